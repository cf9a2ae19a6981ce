//! Boilerplate line detection.

/// Markers of report boilerplate: bank banners, page footers, report titles
/// and horizontal rules.
pub const DEFAULT_NOISE_MARKERS: [&str; 4] = ["BANK NAME", "Page No", "REPORT", "----"];

/// Classifies lines as noise by substring markers.
#[derive(Debug, Clone)]
pub struct LineClassifier {
    markers: Vec<String>,
}

impl LineClassifier {
    /// Create a classifier with the default markers.
    pub fn new() -> Self {
        Self {
            markers: DEFAULT_NOISE_MARKERS.iter().map(|m| m.to_string()).collect(),
        }
    }

    /// Add markers on top of the current set. Empty markers are ignored,
    /// an empty marker would match every line.
    pub fn with_markers<I, S>(mut self, markers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.markers.extend(
            markers
                .into_iter()
                .map(Into::into)
                .filter(|m: &String| !m.is_empty()),
        );
        self
    }

    /// Whether `line` contains any noise marker.
    pub fn is_noise(&self, line: &str) -> bool {
        self.markers.iter().any(|marker| line.contains(marker.as_str()))
    }

    pub fn markers(&self) -> &[String] {
        &self.markers
    }
}

impl Default for LineClassifier {
    fn default() -> Self {
        Self::new()
    }
}
