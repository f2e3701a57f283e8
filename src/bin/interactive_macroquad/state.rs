use parabolic_flight::core::session::ExtremeInput;
use parabolic_flight::core::{LaunchParameters, Planet, Session, SurfaceSize};
use tracing::warn;

/// Slider-backed launch inputs.
#[derive(Clone, Copy, Debug)]
pub(crate) struct LaunchConfig {
    pub(crate) speed_mps: f32,
    pub(crate) angle_deg: f32,
    pub(crate) height_m: f32,
}

impl Default for LaunchConfig {
    fn default() -> Self {
        Self {
            speed_mps: 20.0,
            angle_deg: 45.0,
            height_m: 0.0,
        }
    }
}

impl LaunchConfig {
    pub(crate) fn params(self) -> LaunchParameters {
        LaunchParameters::new(
            f64::from(self.speed_mps),
            f64::from(self.angle_deg),
            f64::from(self.height_m),
        )
    }
}

pub(crate) struct AppRuntime {
    pub(crate) session: Session,
    pub(crate) surface: SurfaceSize,
    pub(crate) planet_idx: usize,
    pub(crate) config: LaunchConfig,
    pub(crate) sim_speed: f32,
    pub(crate) pending_confirmation: Option<Vec<ExtremeInput>>,
    pub(crate) status_line: String,
}

impl AppRuntime {
    pub(crate) fn new(surface: SurfaceSize) -> Self {
        let planet = Planet::presets()[0];
        Self {
            session: Session::new(surface, planet.field()),
            surface,
            planet_idx: 0,
            config: LaunchConfig::default(),
            sim_speed: 1.0,
            pending_confirmation: None,
            status_line: "Ready".to_string(),
        }
    }

    pub(crate) fn planet(&self) -> Planet {
        Planet::presets()[self.planet_idx]
    }

    pub(crate) fn select_planet(&mut self, idx: usize) {
        let count = Planet::presets().len();
        self.planet_idx = idx % count;
        let planet = self.planet();
        match self.session.on_gravity_change(planet.field()) {
            Ok(Some(_)) => self.status_line = format!("Relaunched on {}", planet.name),
            Ok(None) => self.status_line = format!("Planet: {}", planet.name),
            Err(err) => {
                warn!(%err, planet = planet.name, "gravity change rejected");
                self.status_line = err.to_string();
            }
        }
    }

    pub(crate) fn next_planet(&mut self) {
        self.select_planet(self.planet_idx + 1);
    }

    pub(crate) fn prev_planet(&mut self) {
        let count = Planet::presets().len();
        self.select_planet(self.planet_idx + count - 1);
    }

    /// Applies a resize only when the drawing area actually changed.
    pub(crate) fn sync_surface(&mut self, surface: SurfaceSize) {
        if surface != self.surface {
            self.surface = surface;
            self.session.on_resize(surface);
        }
    }

    /// Pushes a moved speed slider into the session.
    pub(crate) fn sync_sim_speed(&mut self) {
        let wanted = f64::from(self.sim_speed);
        if (wanted - self.session.multiplier()).abs() < 1e-3 {
            return;
        }
        if let Err(err) = self.session.set_speed_multiplier(wanted) {
            self.status_line = err.to_string();
        }
    }
}
