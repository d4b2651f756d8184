//! The `toml` module provides TOML deserialization and parsing for evidence files.

// Includes are merged before conversion, so TOML deserialization is not done
// directly in the [`dsfusion_config`](crate) module's structs.

use {
    crate::ConfigFileError,
    dsfusion_decision::CombinationRule,
    itertools::Itertools,
    serde::{Deserialize, Serialize},
    std::{
        collections::HashSet,
        fs,
        path::{Path, PathBuf},
        str::FromStr,
    },
    tracing::debug,
    validator::Validate,
};

/// The TOML serialization for a Config structure.
#[derive(Serialize, Deserialize, Default)]
struct Config {
    frame: Option<Frame>,
    #[serde(default)]
    fusion: Fusion,
    #[serde(default)]
    thresholds: Thresholds,
    #[serde(default, rename(serialize = "include", deserialize = "include"))]
    includes: Vec<Include>,
    #[serde(default, rename(serialize = "source", deserialize = "source"))]
    sources: Vec<Source>,
}

/// The TOML serialization for a Frame structure.
#[derive(Serialize, Deserialize, Clone, PartialEq)]
struct Frame {
    hypotheses: Vec<String>,
}

/// The TOML serialization for a Fusion structure.
#[derive(Serialize, Deserialize)]
struct Fusion {
    #[serde(default = "default_rule")]
    rule: String,
}

/// The default combination rule.
///
/// See [`CombinationRule::default`].
fn default_rule() -> String {
    CombinationRule::default().to_string()
}

impl Default for Fusion {
    fn default() -> Self {
        Self {
            rule: default_rule(),
        }
    }
}

impl TryFrom<Fusion> for crate::Fusion {
    type Error = ConfigFileError;

    fn try_from(fusion: Fusion) -> Result<Self, Self::Error> {
        let rule = CombinationRule::from_str(&fusion.rule)
            .map_err(|_| ConfigFileError::InvalidRule(fusion.rule.clone()))?;
        Ok(Self { rule })
    }
}

/// The TOML serialization for a Thresholds structure.
#[derive(Serialize, Deserialize)]
struct Thresholds {
    #[serde(default = "default_low_uncertainty")]
    low_uncertainty: f64,
    #[serde(default = "default_high_uncertainty")]
    high_uncertainty: f64,
    #[serde(default = "default_decision_threshold")]
    decision: f64,
}

/// The default upper bound for low uncertainty interval widths.
fn default_low_uncertainty() -> f64 {
    dsfusion_decision::DEFAULT_LOW_UNCERTAINTY
}

/// The default lower bound for high uncertainty interval widths.
fn default_high_uncertainty() -> f64 {
    dsfusion_decision::DEFAULT_HIGH_UNCERTAINTY
}

/// The default threshold for accepting a decision.
///
/// See [`DEFAULT_DECISION_THRESHOLD`](crate::DEFAULT_DECISION_THRESHOLD).
fn default_decision_threshold() -> f64 {
    crate::DEFAULT_DECISION_THRESHOLD
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            low_uncertainty: default_low_uncertainty(),
            high_uncertainty: default_high_uncertainty(),
            decision: default_decision_threshold(),
        }
    }
}

impl From<Thresholds> for crate::Thresholds {
    fn from(thresholds: Thresholds) -> Self {
        Self {
            low_uncertainty: thresholds.low_uncertainty,
            high_uncertainty: thresholds.high_uncertainty,
            decision: thresholds.decision,
        }
    }
}

/// The TOML serialization for an Include structure.
#[derive(Serialize, Deserialize)]
struct Include {
    path: String,
}

/// The TOML serialization for a Source structure.
#[derive(Serialize, Deserialize, Clone)]
struct Source {
    name: String,
    #[serde(default = "default_source_reliability")]
    reliability: f64,
    masses: Vec<FocalMass>,
}

/// The default reliability for a source.
///
/// See [`DEFAULT_SOURCE_RELIABILITY`](crate::DEFAULT_SOURCE_RELIABILITY).
fn default_source_reliability() -> f64 {
    crate::DEFAULT_SOURCE_RELIABILITY
}

impl From<&Source> for crate::Source {
    fn from(source: &Source) -> Self {
        Self {
            name: source.name.clone(),
            reliability: source.reliability,
            masses: source.masses.iter().map(|focal| focal.into()).collect(),
        }
    }
}

/// The TOML serialization for a FocalMass structure.
#[derive(Serialize, Deserialize, Clone)]
struct FocalMass {
    hypotheses: Vec<String>,
    mass: f64,
}

impl From<&FocalMass> for crate::FocalMass {
    fn from(focal: &FocalMass) -> Self {
        Self {
            hypotheses: focal.hypotheses.clone(),
            mass: focal.mass,
        }
    }
}

/// Loads a TOML evidence file into a [`Config`](crate::Config) structure.
///
/// Included files are resolved relative to the including file and their sources are appended after the
/// including file's own sources, depth first. Included files may omit the frame of discernment but may not declare a
/// different one. Fusion settings and thresholds are only read from the root file.
pub fn load_config<'a, P>(path: &'a P) -> Result<crate::Config, ConfigFileError>
where
    P: 'a + ?Sized + AsRef<Path>,
{
    fn canonical(path: &Path) -> Result<PathBuf, ConfigFileError> {
        fs::canonicalize(path).map_err(|error| match error.kind() {
            std::io::ErrorKind::NotFound => ConfigFileError::NotFound(path.to_path_buf()),
            _ => ConfigFileError::IO(error),
        })
    }

    fn load_config_recursive(
        path: &Path,
        loading: &mut HashSet<PathBuf>,
    ) -> Result<Config, ConfigFileError> {
        let path = canonical(path)?;
        if !loading.insert(path.clone()) {
            return Err(ConfigFileError::CircularInclude(
                path.display().to_string(),
            ));
        }
        debug!(message = "loading evidence file", path = %path.display());

        let toml_data = fs::read_to_string(&path)?;
        let mut root: Config = toml::from_str(&toml_data)?;
        let base = path
            .parent()
            .ok_or_else(|| ConfigFileError::MissingParent(path.display().to_string()))?;

        for include in &root.includes {
            let include_path = base.join(&include.path);
            let include_root = load_config_recursive(&include_path, loading)?;

            if let Some(include_frame) = include_root.frame {
                if root.frame.is_none() {
                    root.frame = Some(include_frame);
                } else if root.frame.as_ref() != Some(&include_frame) {
                    return Err(ConfigFileError::FrameMismatch(include.path.clone()));
                }
            }
            root.sources.extend(include_root.sources);
        }

        // Strip includes once processed
        root.includes = vec![];
        loading.remove(&path);

        Ok(root)
    }

    // Load the raw serialization format and resolve includes
    let root = load_config_recursive(path.as_ref(), &mut HashSet::new())?;

    if let Some(name) = root
        .sources
        .iter()
        .map(|source| source.name.as_str())
        .duplicates()
        .next()
    {
        return Err(ConfigFileError::Duplicate(name.to_string()));
    }

    let frame = match root.frame {
        Some(frame) if !frame.hypotheses.is_empty() => frame.hypotheses,
        _ => return Err(ConfigFileError::MissingFrame),
    };

    let config = crate::Config {
        frame,
        fusion: root.fusion.try_into()?,
        thresholds: root.thresholds.into(),
        sources: root.sources.iter().map(|source| source.into()).collect(),
    };

    config.thresholds.validate()?;
    for source in &config.sources {
        source.validate()?;
        for focal in &source.masses {
            focal.validate()?;
        }
    }

    Ok(config)
}
