//! LNS driver configuration (C5).

/// Parameters controlling the Metropolis acceptance rule's cooling
/// schedule.
#[derive(Debug, Clone, Copy)]
pub struct LNSParameters {
    /// Initial temperature is `|obj(initial)| * init_temp_factor + eps`.
    pub init_temp_factor: f64,
    /// Geometric cooling factor applied after every iteration.
    /// `1.0` keeps the temperature constant.
    pub temp_dec_factor: f64,
}

impl Default for LNSParameters {
    fn default() -> Self {
        Self {
            init_temp_factor: 0.0,
            temp_dec_factor: 0.99,
        }
    }
}

impl LNSParameters {
    pub fn with_init_temp_factor(mut self, init_temp_factor: f64) -> Self {
        self.init_temp_factor = init_temp_factor;
        self
    }
    pub fn with_temp_dec_factor(mut self, temp_dec_factor: f64) -> Self {
        self.temp_dec_factor = temp_dec_factor;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_spec() {
        let p = LNSParameters::default();
        assert_eq!(p.init_temp_factor, 0.0);
        assert_eq!(p.temp_dec_factor, 0.99);
    }
}
