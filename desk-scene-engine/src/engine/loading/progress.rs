use std::collections::BTreeMap;

use bevy::prelude::*;

/// Loading progress shared by every request that opts into reporting.
#[derive(Resource, Default)]
pub struct LoadingProgress {
    pub baseline_loaded: bool,
    entries: BTreeMap<String, f32>,
}

impl LoadingProgress {
    /// Records progress for `name`; a smaller value than the last one is ignored.
    pub fn report(&mut self, name: &str, fraction: f32) {
        let fraction = fraction.clamp(0.0, 1.0);
        let entry = self.entries.entry(name.to_owned()).or_insert(0.0);
        if fraction > *entry {
            *entry = fraction;
        }
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, f32)> {
        self.entries.iter().map(|(name, fraction)| (name.as_str(), *fraction))
    }

    /// Mean progress over every reported entry, 0 when nothing reported yet.
    pub fn overall(&self) -> f32 {
        if self.entries.is_empty() {
            return 0.0;
        }
        self.entries.values().sum::<f32>() / self.entries.len() as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entries_never_move_backwards() {
        let mut progress = LoadingProgress::default();
        progress.report("models/a.glb", 0.5);
        progress.report("models/a.glb", 0.25);
        progress.report("models/b.glb", 1.0);

        let entries: Vec<_> = progress.entries().collect();
        assert_eq!(entries, vec![("models/a.glb", 0.5), ("models/b.glb", 1.0)]);
        assert_eq!(progress.overall(), 0.75);
    }
}
