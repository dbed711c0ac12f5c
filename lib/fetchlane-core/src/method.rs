//! HTTP method types.

use std::str::FromStr;

use derive_more::Display;

/// HTTP request method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Method {
    /// GET method - retrieve a resource.
    #[display("GET")]
    Get,
    /// POST method - create a resource.
    #[display("POST")]
    Post,
    /// PUT method - replace a resource.
    #[display("PUT")]
    Put,
    /// DELETE method - remove a resource.
    #[display("DELETE")]
    Delete,
    /// PATCH method - partially update a resource.
    #[display("PATCH")]
    Patch,
    /// HEAD method - retrieve headers only.
    #[display("HEAD")]
    Head,
    /// OPTIONS method - retrieve allowed methods.
    #[display("OPTIONS")]
    Options,
}

impl Method {
    /// The verb as sent on the wire.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
            Self::Patch => "PATCH",
            Self::Head => "HEAD",
            Self::Options => "OPTIONS",
        }
    }
}

/// Parses a verb such as `"get"` or `"POST"`, ignoring ASCII case.
impl FromStr for Method {
    type Err = crate::Error;

    fn from_str(verb: &str) -> Result<Self, Self::Err> {
        const ALL: [Method; 7] = [
            Method::Get,
            Method::Post,
            Method::Put,
            Method::Delete,
            Method::Patch,
            Method::Head,
            Method::Options,
        ];

        ALL.into_iter()
            .find(|method| method.as_str().eq_ignore_ascii_case(verb.trim()))
            .ok_or_else(|| crate::Error::InvalidMethod(verb.to_string()))
    }
}

impl From<Method> for http::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => Self::GET,
            Method::Post => Self::POST,
            Method::Put => Self::PUT,
            Method::Delete => Self::DELETE,
            Method::Patch => Self::PATCH,
            Method::Head => Self::HEAD,
            Method::Options => Self::OPTIONS,
        }
    }
}

#[cfg(test)]
mod tests {
    use assert2::{check, let_assert};

    use super::*;

    #[test]
    fn method_display_matches_wire_verb() {
        for method in [
            Method::Get,
            Method::Post,
            Method::Put,
            Method::Delete,
            Method::Patch,
            Method::Head,
            Method::Options,
        ] {
            assert_eq!(method.to_string(), method.as_str());
        }
    }

    #[test]
    fn method_parses_any_case() {
        check!("GET".parse::<Method>().ok() == Some(Method::Get));
        check!("post".parse::<Method>().ok() == Some(Method::Post));
        check!(" Patch ".parse::<Method>().ok() == Some(Method::Patch));
    }

    #[test]
    fn method_rejects_unknown_verb() {
        let_assert!(Err(crate::Error::InvalidMethod(verb)) = "BREW".parse::<Method>());
        check!(verb == "BREW");
        check!("".parse::<Method>().is_err());
    }

    #[test]
    fn method_into_http() {
        assert_eq!(http::Method::from(Method::Get), http::Method::GET);
        assert_eq!(http::Method::from(Method::Options), http::Method::OPTIONS);
    }
}
