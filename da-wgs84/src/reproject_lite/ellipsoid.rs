//! Définitions des ellipsoïdes

/// Ellipsoïde de référence, défini par son demi-grand axe et son aplatissement
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ellipsoid {
    /// Demi-grand axe (rayon équatorial) en mètres
    pub a: f64,

    /// Aplatissement
    pub f: f64,
}

impl Ellipsoid {
    /// GRS80, ellipsoïde de NAD83 (EPSG:3347)
    pub const GRS80: Ellipsoid = Ellipsoid {
        a: 6378137.0,
        f: 1.0 / 298.257222101,
    };

    /// WGS84 (EPSG:4326)
    /// Note: Quasi identique à GRS80, différence < 0.1mm
    pub const WGS84: Ellipsoid = Ellipsoid {
        a: 6378137.0,
        f: 1.0 / 298.257223563,
    };

    /// Première excentricité au carré
    pub fn e2(&self) -> f64 {
        2.0 * self.f - self.f * self.f
    }

    /// Première excentricité
    pub fn e(&self) -> f64 {
        self.e2().sqrt()
    }

    /// Grande normale (rayon de courbure dans le plan vertical)
    pub fn grande_normale(&self, lat: f64) -> f64 {
        self.a / (1.0 - self.e2() * lat.sin().powi(2)).sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_excentricity() {
        assert!((Ellipsoid::GRS80.e() - 0.0818191910428158).abs() < 1e-15);
        assert!((Ellipsoid::WGS84.e() - 0.0818191908426215).abs() < 1e-15);
    }
}
