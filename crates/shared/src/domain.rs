use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::ParseProductTypeError;

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub i64);
    };
}

id_newtype!(RepositoryId);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductType {
    #[default]
    Electronic,
    Furniture,
    Clothing,
}

impl ProductType {
    pub const ALL: [ProductType; 3] = [Self::Electronic, Self::Furniture, Self::Clothing];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Electronic => "electronic",
            Self::Furniture => "furniture",
            Self::Clothing => "clothing",
        }
    }
}

impl fmt::Display for ProductType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProductType {
    type Err = ParseProductTypeError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(value))
            .ok_or_else(|| ParseProductTypeError(value.to_string()))
    }
}
