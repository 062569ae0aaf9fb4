use crate::error::PlannerError;
use crate::error::Result;

/// which save container format a file carries, discriminated by suffix
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Platform {
    Pc,
    Console,
}

impl Platform {
    /// `.sl2` is the PC BND4 archive, `.dat` the console concatenation
    pub fn from_filename(filename: &str) -> Result<Platform> {
        let suffix = filename
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .unwrap_or_default();
        match suffix.as_str() {
            "sl2" => Ok(Platform::Pc),
            "dat" => Ok(Platform::Console),
            _ => Err(PlannerError::InvalidContainer(format!(
                "unsupported save suffix '.{}'",
                suffix
            ))),
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Platform::Pc => write!(f, "PC"),
            Platform::Console => write!(f, "Console"),
        }
    }
}
