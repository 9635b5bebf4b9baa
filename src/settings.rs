use core::fmt;
use rigid_logging::{log_warning, LogCategory, LogLevel};
use rigid_math::*;
use toml::{Table, Value};

const LOG_CAT : LogCategory = LogCategory::new_with_sub("Main", "Settings");

/// Settings error
#[derive(Clone, PartialEq, Debug)]
pub enum SettingsError {
    /// The settings file couldn't be read
    Io(String),
    /// The settings aren't valid toml
    Parse(String),
    /// A key has a value of the wrong type
    InvalidType { key: String, expected: &'static str, found: &'static str },
    /// An array has the wrong number of elements
    InvalidLength { key: String, expected: usize, found: usize },
    /// A key has a value that is out of range
    InvalidValue { key: String, reason: &'static str },
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::Io(err)                                => f.write_fmt(format_args!("Failed to read settings: {err}")),
            SettingsError::Parse(err)                             => f.write_fmt(format_args!("Failed to parse settings: {err}")),
            SettingsError::InvalidType { key, expected, found }   => f.write_fmt(format_args!("Invalid type for '{key}', expected {expected}, found {found}")),
            SettingsError::InvalidLength { key, expected, found } => f.write_fmt(format_args!("Invalid length for '{key}', expected {expected} elements, found {found}")),
            SettingsError::InvalidValue { key, reason }           => f.write_fmt(format_args!("Invalid value for '{key}': {reason}")),
        }
    }
}

impl std::error::Error for SettingsError {}

pub type Result<T> = core::result::Result<T, SettingsError>;

/// Logger settings
#[derive(Clone, PartialEq, Debug)]
pub struct LoggingSettings {
    /// Maximum level that is logged
    pub level          : LogLevel,
    /// Flush after every message
    pub always_flush   : bool,
    /// Also write messages to stdout
    pub log_to_console : bool,
    /// Optional file to write the log to
    pub file           : Option<String>,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            always_flush: false,
            log_to_console: true,
            file: None,
        }
    }
}

/// Initial state of the simulated body
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct BodySettings {
    /// World-space position
    pub position    : Vec3,
    /// World-space orientation, normalized before it's used
    pub orientation : Quat,
    /// Point in the local space of the body that is reported in world space
    pub local_point : Vec3,
}

impl Default for BodySettings {
    fn default() -> Self {
        Self {
            position: Vec3::zero(),
            orientation: Quat::identity(),
            local_point: Vec3::new(1.0, 0.0, 0.0),
        }
    }
}

/// Orientation integration settings
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct SimulationSettings {
    /// Number of integration steps
    pub steps             : u32,
    /// Time step in seconds
    pub dt                : Scalar,
    /// Angular velocity in radians per second
    pub angular_velocity  : Vec3,
    /// Per axis scale of the angular velocity
    pub angular_factor    : Vec3,
    /// Renormalize the orientation every N steps, 0 never renormalizes during integration
    pub renormalize_every : u32,
    /// Order of the reported euler angles
    pub euler_order       : AxisOrder,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            steps: 100,
            dt: 0.01,
            angular_velocity: Vec3::new(0.0, 1.0, 0.0),
            angular_factor: Vec3::new(1.0, 1.0, 1.0),
            renormalize_every: 10,
            euler_order: AxisOrder::YZX,
        }
    }
}

/// Testbed settings
#[derive(Clone, PartialEq, Debug, Default)]
pub struct Settings {
    pub logging    : LoggingSettings,
    pub body       : BodySettings,
    pub simulation : SimulationSettings,
}

impl Settings {
    /// Load the settings from a toml string, missing keys keep their default value
    pub fn load(toml: &str) -> Result<Settings> {
        let toml = toml.parse::<Table>().map_err(|err| SettingsError::Parse(err.to_string()))?;
        let mut settings = Settings::default();

        for (name, item) in &toml {
            match (name.as_str(), item) {
                ("logging", Value::Table(table))    => load_logging(table, &mut settings.logging)?,
                ("body", Value::Table(table))       => load_body(table, &mut settings.body)?,
                ("simulation", Value::Table(table)) => load_simulation(table, &mut settings.simulation)?,
                ("logging" | "body" | "simulation", item) => return Err(invalid_type(name, "table", item)),
                (name, _) => log_warning!(LOG_CAT, "Unknown settings section '{}', ignoring it", name),
            }
        }
        Ok(settings)
    }
}

fn load_logging(table: &Table, settings: &mut LoggingSettings) -> Result<()> {
    for (name, item) in table {
        let key = format!("logging.{name}");
        match name.as_str() {
            "level" => {
                let level = get_str(&key, item)?;
                settings.level = LogLevel::from_name(level).ok_or(SettingsError::InvalidValue { key, reason: "unknown log level" })?;
            },
            "always_flush"   => settings.always_flush = get_bool(&key, item)?,
            "log_to_console" => settings.log_to_console = get_bool(&key, item)?,
            "file"           => settings.file = Some(get_str(&key, item)?.to_string()),
            _ => log_warning!(LOG_CAT, "Unknown key '{}', ignoring it", key),
        }
    }
    Ok(())
}

fn load_body(table: &Table, settings: &mut BodySettings) -> Result<()> {
    for (name, item) in table {
        let key = format!("body.{name}");
        match name.as_str() {
            "position"    => settings.position = Vec3::from_array(get_floats(&key, item)?),
            "orientation" => settings.orientation = Quat::from_array(get_floats(&key, item)?),
            "local_point" => settings.local_point = Vec3::from_array(get_floats(&key, item)?),
            _ => log_warning!(LOG_CAT, "Unknown key '{}', ignoring it", key),
        }
    }
    Ok(())
}

fn load_simulation(table: &Table, settings: &mut SimulationSettings) -> Result<()> {
    for (name, item) in table {
        let key = format!("simulation.{name}");
        match name.as_str() {
            "steps" => settings.steps = get_u32(&key, item)?,
            "dt" => {
                let dt = get_float(&key, item)?;
                if !dt.is_finite() || dt <= 0.0 {
                    return Err(SettingsError::InvalidValue { key, reason: "time step needs to be a positive number" });
                }
                settings.dt = dt;
            },
            "angular_velocity"  => settings.angular_velocity = Vec3::from_array(get_floats(&key, item)?),
            "angular_factor"    => settings.angular_factor = Vec3::from_array(get_floats(&key, item)?),
            "renormalize_every" => settings.renormalize_every = get_u32(&key, item)?,
            "euler_order"       => settings.euler_order = get_axis_order(&key, item)?,
            _ => log_warning!(LOG_CAT, "Unknown key '{}', ignoring it", key),
        }
    }
    Ok(())
}

fn invalid_type(key: &str, expected: &'static str, item: &Value) -> SettingsError {
    SettingsError::InvalidType { key: key.to_string(), expected, found: item.type_str() }
}

fn get_str<'a>(key: &str, item: &'a Value) -> Result<&'a str> {
    match item {
        Value::String(s) => Ok(s.as_str()),
        _ => Err(invalid_type(key, "string", item)),
    }
}

fn get_bool(key: &str, item: &Value) -> Result<bool> {
    match item {
        Value::Boolean(b) => Ok(*b),
        _ => Err(invalid_type(key, "boolean", item)),
    }
}

fn get_float(key: &str, item: &Value) -> Result<Scalar> {
    match item {
        Value::Float(f)   => Ok(*f),
        Value::Integer(i) => Ok(*i as Scalar),
        _ => Err(invalid_type(key, "float", item)),
    }
}

fn get_u32(key: &str, item: &Value) -> Result<u32> {
    match item {
        Value::Integer(i) => u32::try_from(*i).map_err(|_| SettingsError::InvalidValue { key: key.to_string(), reason: "value needs to be between 0 and 4294967295" }),
        _ => Err(invalid_type(key, "integer", item)),
    }
}

fn get_floats<const N: usize>(key: &str, item: &Value) -> Result<[Scalar; N]> {
    let arr = match item {
        Value::Array(arr) => arr,
        _ => return Err(invalid_type(key, "array", item)),
    };
    if arr.len() != N {
        return Err(SettingsError::InvalidLength { key: key.to_string(), expected: N, found: arr.len() });
    }

    let mut res = [0.0; N];
    for (idx, elem) in arr.iter().enumerate() {
        res[idx] = get_float(&format!("{key}[{idx}]"), elem)?;
    }
    Ok(res)
}

/// Unknown orders fall back to [`AxisOrder::XYZ`] with a warning, as the euler angles are only reported
fn get_axis_order(key: &str, item: &Value) -> Result<AxisOrder> {
    match item {
        Value::String(name) => {
            if AxisOrder::parse(&name.trim().to_ascii_uppercase()).is_none() {
                log_warning!(LOG_CAT, "Unknown axis order '{}' for '{}', using {}", name, key, AxisOrder::XYZ);
            }
            Ok(AxisOrder::from_name_or_default(name))
        },
        Value::Integer(value) => {
            let idx = usize::try_from(*value).unwrap_or(usize::MAX);
            if AxisOrder::from_idx(idx).is_none() {
                log_warning!(LOG_CAT, "Unknown axis order index {} for '{}', using {}", value, key, AxisOrder::XYZ);
            }
            Ok(AxisOrder::from_index_or_default(idx))
        },
        _ => Err(invalid_type(key, "string or integer", item)),
    }
}
