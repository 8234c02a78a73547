use thiserror::Error;

/// error types of the rate-constant engine
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RateError {
    /// a pressure-dependent form was requested but the caller supplied no pressure grid
    #[error("{form} rate constants need a pressure grid, but none was supplied")]
    Configuration { form: &'static str },
    /// declared dimensions of the parameters do not match the data
    #[error("malformed rate parameters: {0}")]
    MalformedInput(String),
    /// rate tables of different temperature-grid length (or key sets) met in one operation
    #[error("rate tables do not match: {0}")]
    ShapeMismatch(String),
}

/// error types of the CHEMKIN reaction block parser
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ChemkinParseError {
    #[error("no REACTIONS block found in mechanism")]
    NoReactionBlock,
    #[error("cannot parse number '{token}' in line '{line}'")]
    BadNumber { token: String, line: String },
    #[error("auxiliary line '{0}' appears before any reaction")]
    OrphanAuxiliaryLine(String),
    #[error("reaction '{0}' has no '=' separating reactants from products")]
    NoEquationSeparator(String),
    #[error("keyword {keyword} expects {expected} values, found {found} in line '{line}'")]
    WrongValueCount {
        keyword: String,
        expected: String,
        found: usize,
        line: String,
    },
}
