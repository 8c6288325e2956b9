//! Day/night switching.

use super::Scene;

/// Lighting mode of the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeOfDay {
    /// Full sun, sky-blue background, garden lights off.
    #[default]
    Day,
    /// Dim sun, black background, garden lights on, moon and stars out.
    Night,
}

impl Scene {
    /// Current lighting mode.
    #[must_use]
    pub fn time_of_day(&self) -> TimeOfDay {
        self.time_of_day
    }

    /// Switch to daytime lighting. Returns `false` if it was already day.
    pub fn set_day_time(&mut self) -> bool {
        if self.time_of_day == TimeOfDay::Day {
            return false;
        }

        self.set_garden_light_intensity(0.0);
        let _ = self.detach(self.moon);
        let _ = self.detach(self.stars);
        self.background = self.lighting.day_background;
        self.set_light_intensity(self.sun, self.lighting.day_sun_intensity);

        self.time_of_day = TimeOfDay::Day;
        log::info!("switched to day time");
        true
    }

    /// Switch to nighttime lighting. Returns `false` if it was already
    /// night.
    pub fn set_night_time(&mut self) -> bool {
        if self.time_of_day == TimeOfDay::Night {
            return false;
        }

        self.set_garden_light_intensity(self.lighting.garden_light_intensity);
        self.set_light_intensity(self.sun, self.lighting.night_sun_intensity);
        let _ = self.attach(self.moon);
        let _ = self.attach(self.stars);
        self.background = self.lighting.night_background;

        self.time_of_day = TimeOfDay::Night;
        log::info!("switched to night time");
        true
    }
}
