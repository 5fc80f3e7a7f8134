use constants::animation_catalogue::{find_range, find_settings};

/// A window `[start_secs, end_secs)` of the baked track played as its own loop.
#[derive(Debug, Clone, PartialEq)]
pub struct Subclip {
    pub name: &'static str,
    pub start_secs: f32,
    pub end_secs: f32,
    /// Playback speed relative to the authored frame rate.
    pub time_scale: f32,
}

impl Subclip {
    pub fn from_frames(
        name: &'static str,
        start_frame: u32,
        end_frame: u32,
        frame_rate: f32,
        time_scale: f32,
    ) -> Self {
        Self {
            name,
            start_secs: start_frame as f32 / frame_rate,
            end_secs: end_frame as f32 / frame_rate,
            time_scale,
        }
    }

    pub fn duration(&self) -> f32 {
        (self.end_secs - self.start_secs).max(0.0)
    }
}

/// Cuts the named animation out of the baked track, `None` when it is not catalogued.
pub fn extract_subclip(name: &str, frame_rate: f32) -> Option<Subclip> {
    let range = find_range(name)?;
    let time_scale = find_settings(name).map_or(1.0, |settings| settings.speed);
    Some(Subclip::from_frames(
        range.name,
        range.start_frame,
        range.end_frame,
        frame_rate,
        time_scale,
    ))
}

/// Local clock of a looping sub-clip.
#[derive(Debug, Clone)]
pub struct SubclipPlayback {
    clip: Subclip,
    local_time: f32,
}

impl SubclipPlayback {
    pub fn new(clip: Subclip) -> Self {
        Self {
            clip,
            local_time: 0.0,
        }
    }

    pub fn clip(&self) -> &Subclip {
        &self.clip
    }

    /// Position on the baked track.
    pub fn source_time(&self) -> f32 {
        self.clip.start_secs + self.local_time
    }

    /// Steps by `delta` wall seconds, wrapping at the end of the window.
    pub fn advance(&mut self, delta: f32) -> f32 {
        let duration = self.clip.duration();
        self.local_time = if duration > 0.0 {
            (self.local_time + delta * self.clip.time_scale).rem_euclid(duration)
        } else {
            0.0
        };
        self.source_time()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use constants::animation_catalogue::ANIMATION_FRAME_RATE;

    #[test]
    fn idle_sit_lasts_five_and_a_half_seconds() {
        let clip = extract_subclip("IdleSit", ANIMATION_FRAME_RATE).unwrap();
        assert!((clip.duration() - 5.5).abs() < 1e-5);
        assert_eq!(clip.start_secs, 10.0);
        assert_eq!(clip.time_scale, 0.5);
    }

    #[test]
    fn unknown_animation_is_not_extracted() {
        assert_eq!(extract_subclip("Backflip", ANIMATION_FRAME_RATE), None);
    }

    #[test]
    fn playback_loops_inside_the_window() {
        let clip = extract_subclip("IdleSit", ANIMATION_FRAME_RATE).unwrap();
        let mut playback = SubclipPlayback::new(clip);

        // 12 s at half speed is 6 s of clip time: one full loop plus 0.5 s.
        let source = playback.advance(12.0);
        assert!((source - 10.5).abs() < 1e-4);

        for _ in 0..1000 {
            let source = playback.advance(0.016);
            assert!((10.0..=15.5).contains(&source));
        }
    }

    #[test]
    fn empty_window_stays_at_its_start() {
        let mut playback = SubclipPlayback::new(Subclip::from_frames("Still", 90, 90, 30.0, 1.0));
        assert_eq!(playback.advance(3.0), 3.0);
    }
}
