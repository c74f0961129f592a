//! Function bodies and names

use crate::block::Block;
use itertools::Itertools;
use std::fmt::{Display, Formatter};

/// The parameter list and block of a function
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FunctionBody {
    pub parameters: Vec<String>,
    /// Set when the parameter list ends in `...`
    pub variadic: bool,
    pub block: Block,
}

impl FunctionBody {
    pub fn new<S: AsRef<str>>(
        parameters: impl IntoIterator<Item = S>,
        variadic: bool,
        block: Block,
    ) -> Self {
        Self {
            parameters: parameters
                .into_iter()
                .map(|s| s.as_ref().to_string())
                .collect(),
            variadic,
            block,
        }
    }
}

/// The name of a function statement, `a.b.c:m`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FunctionName {
    pub name: String,
    pub members: Vec<String>,
    pub method: Option<String>,
}

impl FunctionName {
    pub fn new(name: impl AsRef<str>) -> Self {
        Self {
            name: name.as_ref().to_string(),
            members: vec![],
            method: None,
        }
    }
}

impl Display for FunctionName {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            std::iter::once(&self.name).chain(&self.members).join(".")
        )?;
        if let Some(method) = &self.method {
            write!(f, ":{method}")?;
        }
        Ok(())
    }
}
