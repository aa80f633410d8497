//! HTTP verbs accepted by route attributes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// An HTTP verb a route can answer to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Head,
    Post,
    Put,
    Patch,
    Delete,
    Options,
}

impl HttpMethod {
    /// Every verb, used by `Any` routes.
    pub const ALL: [HttpMethod; 7] = [
        HttpMethod::Get,
        HttpMethod::Head,
        HttpMethod::Post,
        HttpMethod::Put,
        HttpMethod::Patch,
        HttpMethod::Delete,
        HttpMethod::Options,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Head => "HEAD",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Options => "OPTIONS",
        }
    }

    /// Parse a list of verb names, case-insensitively.
    ///
    /// `"any"` expands to [`HttpMethod::ALL`]. Order is preserved and
    /// duplicates are dropped.
    pub fn parse_list<S: AsRef<str>>(names: &[S]) -> Result<Vec<HttpMethod>, CoreError> {
        let mut methods = Vec::with_capacity(names.len());
        for name in names {
            let name = name.as_ref();
            if name.eq_ignore_ascii_case("any") {
                for m in HttpMethod::ALL {
                    if !methods.contains(&m) {
                        methods.push(m);
                    }
                }
                continue;
            }
            let m: HttpMethod = name.parse()?;
            if !methods.contains(&m) {
                methods.push(m);
            }
        }
        Ok(methods)
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HttpMethod {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "GET" => Ok(HttpMethod::Get),
            "HEAD" => Ok(HttpMethod::Head),
            "POST" => Ok(HttpMethod::Post),
            "PUT" => Ok(HttpMethod::Put),
            "PATCH" => Ok(HttpMethod::Patch),
            "DELETE" => Ok(HttpMethod::Delete),
            "OPTIONS" => Ok(HttpMethod::Options),
            _ => Err(CoreError::InvalidMethod(s.to_string())),
        }
    }
}
