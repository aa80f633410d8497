//! Route parameter constraints.

use std::fmt;

/// Capability shared by every constraint attribute: a parameter name and
/// the pattern it must match.
pub trait WhereAttribute: fmt::Debug + Send + Sync {
    fn param(&self) -> &str;
    fn constraint(&self) -> String;
}

/// Constrain `param` with an arbitrary pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Where {
    pub param: String,
    pub constraint: String,
}

impl Where {
    pub fn new(param: impl Into<String>, constraint: impl Into<String>) -> Self {
        Self {
            param: param.into(),
            constraint: constraint.into(),
        }
    }
}

impl WhereAttribute for Where {
    fn param(&self) -> &str {
        &self.param
    }

    fn constraint(&self) -> String {
        self.constraint.clone()
    }
}

macro_rules! fixed_where {
    ($(#[$doc:meta])* $name:ident => $pattern:expr) => {
        $(#[$doc])*
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub struct $name {
            pub param: String,
        }

        impl $name {
            pub fn new(param: impl Into<String>) -> Self {
                Self { param: param.into() }
            }
        }

        impl WhereAttribute for $name {
            fn param(&self) -> &str {
                &self.param
            }

            fn constraint(&self) -> String {
                $pattern.to_string()
            }
        }
    };
}

fixed_where!(
    /// Letters only.
    WhereAlpha => "[a-zA-Z]+"
);
fixed_where!(
    /// Letters and digits.
    WhereAlphaNumeric => "[a-zA-Z0-9]+"
);
fixed_where!(
    /// Digits only.
    WhereNumber => "[0-9]+"
);
fixed_where!(
    WhereUuid => "[\\da-fA-F]{8}-[\\da-fA-F]{4}-[\\da-fA-F]{4}-[\\da-fA-F]{4}-[\\da-fA-F]{12}"
);
fixed_where!(
    WhereUlid => "[0-7][0-9a-hjkmnp-tv-zA-HJKMNP-TV-Z]{25}"
);

/// Restrict `param` to one of a fixed set of literal values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WhereIn {
    pub param: String,
    pub values: Vec<String>,
}

impl WhereIn {
    pub fn new<I, S>(param: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            param: param.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }
}

impl WhereAttribute for WhereIn {
    fn param(&self) -> &str {
        &self.param
    }

    fn constraint(&self) -> String {
        self.values
            .iter()
            .map(|v| regex::escape(v))
            .collect::<Vec<_>>()
            .join("|")
    }
}
