use std::{env, fs, io, process::ExitCode};

use rigid_logging::{log_error, log_info, log_severe, log_verbose, set_logger, LogCategory, Logger};
use rigid_math::*;

mod settings;
use settings::{LoggingSettings, Settings, SettingsError};

pub const LOG_CAT : LogCategory = LogCategory::new("Main");

const DEFAULT_SETTINGS_PATH : &str = "rigid.toml";

static LOGGER : Logger = Logger::new();

fn main() -> ExitCode {
    set_logger(&LOGGER);

    let path = env::args().nth(1).unwrap_or_else(|| DEFAULT_SETTINGS_PATH.to_string());
    let settings = match load_settings(&path) {
        Ok(settings) => settings,
        Err(err) => {
            log_severe!(LOG_CAT, main, "Failed to load '{}': {}", path, err);
            LOGGER.flush();
            return ExitCode::FAILURE;
        }
    };
    setup_logger(&settings.logging);

    let result = simulate(&settings);
    report(&settings, &result);

    LOGGER.flush();
    ExitCode::SUCCESS
}

fn load_settings(path: &str) -> Result<Settings, SettingsError> {
    match fs::read_to_string(path) {
        Ok(toml) => Settings::load(&toml),
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            log_info!(LOG_CAT, "No settings found at '{}', using the defaults", path);
            Ok(Settings::default())
        },
        Err(err) => Err(SettingsError::Io(err.to_string())),
    }
}

fn setup_logger(settings: &LoggingSettings) {
    LOGGER.set_max_level(settings.level);
    LOGGER.set_always_flush(settings.always_flush);
    LOGGER.set_log_to_console(settings.log_to_console);

    if let Some(path) = &settings.file {
        match fs::File::create(path) {
            Ok(file) => if LOGGER.add_writer(Box::new(file)).is_err() {
                log_error!(LOG_CAT, setup_logger, "No free log writer slot for '{}'", path);
            },
            Err(err) => log_error!(LOG_CAT, setup_logger, "Failed to create log file '{}': {}", path, err),
        }
    }
}

/// Final state of the simulated body
struct SimulationResult {
    transform   : Transform,
    world_point : Vec3,
    euler       : Vec3,
    axis        : Vec3,
    angle       : Scalar,
}

fn simulate(settings: &Settings) -> SimulationResult {
    let body = &settings.body;
    let sim = &settings.simulation;

    let mut transform = Transform::new(body.position, body.orientation);
    transform.rotation.normalize();
    log_info!(LOG_CAT, "Initial transform: {}", transform);

    for step in 1..=sim.steps {
        transform.rotation = transform.rotation.integrate(sim.angular_velocity, sim.dt, sim.angular_factor);
        if sim.renormalize_every != 0 && step % sim.renormalize_every == 0 {
            transform.rotation.normalize();
        }
        log_verbose!(LOG_CAT, "Step {}: rotation {}", step, transform.rotation);
    }
    transform.rotation.normalize();

    let world_point = transform.point_to_world(body.local_point);
    let euler = transform.rotation.to_euler(sim.euler_order);
    let mut rotation = transform.rotation;
    let (axis, angle) = rotation.to_axis_angle();

    SimulationResult { transform, world_point, euler, axis, angle }
}

fn report(settings: &Settings, result: &SimulationResult) {
    let sim = &settings.simulation;
    log_info!(LOG_CAT, "Integrated {} steps of {}s", sim.steps, sim.dt);
    log_info!(LOG_CAT, "Final transform: {}", result.transform);
    log_info!(LOG_CAT, "Local point {} is at {} in world space", settings.body.local_point, result.world_point);
    log_info!(LOG_CAT, "Euler angles ({}): {}", sim.euler_order, result.euler);
    log_info!(LOG_CAT, "Axis-angle: {} rad around {}", result.angle, result.axis);
}

#[cfg(test)]
mod tests {
    use core::f64::consts::FRAC_PI_2;
    use super::*;

    #[test]
    fn quarter_turn_around_z() {
        let mut settings = Settings::default();
        settings.body.position = Vec3::new(0.0, 0.0, 5.0);
        settings.simulation.steps = 1000;
        settings.simulation.dt = 0.001;
        settings.simulation.angular_velocity = Vec3::new(0.0, 0.0, FRAC_PI_2);
        settings.simulation.renormalize_every = 1;

        let result = simulate(&settings);
        assert!(result.world_point.is_close_to(Vec3::new(0.0, 1.0, 5.0), 1e-4), "got {}", result.world_point);
        assert!(result.axis.is_close_to(Vec3::new(0.0, 0.0, 1.0), 1e-4));
        assert!(result.angle.is_close_to(FRAC_PI_2, 1e-4));
        assert!(result.euler.is_close_to(Vec3::new(0.0, 0.0, FRAC_PI_2), 1e-2));
        assert!(result.transform.rotation.norm().almost_equals(1.0));
    }

    #[test]
    fn angular_factor_blocks_rotation() {
        let mut settings = Settings::default();
        settings.simulation.angular_factor = Vec3::new(1.0, 0.0, 1.0);

        let result = simulate(&settings);
        assert_eq!(result.transform.rotation, Quat::identity());
        assert_eq!(result.world_point, settings.body.local_point);
        assert_eq!(result.angle, 0.0);
    }
}
