//! # Kinematics Module
//!
//! Four-momentum extraction from the various upstream object
//! representations an analysis loop hands to the event table: plain
//! (pt, eta, phi, m) values, clustered jets carrying Cartesian components,
//! and truth-particle records with generator status and PDG identity.
//!
//! The table's group operations are generic over [`HasFourMomentum`], so a
//! single `add_jet` accepts any of these shapes; a blanket impl for
//! references makes containers of handles work without adapter code.

/// Kinematic descriptor of a physics object: transverse momentum,
/// pseudorapidity, azimuth, and invariant mass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FourMomentum {
    pt: f64,
    eta: f64,
    phi: f64,
    mass: f64,
}

impl FourMomentum {
    /// Create a four-momentum from (pt, eta, phi, m) components.
    pub fn new(pt: f64, eta: f64, phi: f64, mass: f64) -> Self {
        Self { pt, eta, phi, mass }
    }

    /// Create a four-momentum from Cartesian (px, py, pz, E) components.
    ///
    /// Spacelike inputs yield a negative mass, mirroring the usual
    /// sign-of-m² convention.
    pub fn from_cartesian(px: f64, py: f64, pz: f64, energy: f64) -> Self {
        let pt = px.hypot(py);
        // Objects along the beamline have undefined eta; pin it to zero.
        let eta = if pt > 0.0 { (pz / pt).asinh() } else { 0.0 };
        let phi = if px == 0.0 && py == 0.0 {
            0.0
        } else {
            py.atan2(px)
        };
        let m2 = energy * energy - (px * px + py * py + pz * pz);
        let mass = if m2 >= 0.0 { m2.sqrt() } else { -(-m2).sqrt() };
        Self { pt, eta, phi, mass }
    }

    /// Transverse momentum.
    pub fn pt(&self) -> f64 {
        self.pt
    }

    /// Pseudorapidity.
    pub fn eta(&self) -> f64 {
        self.eta
    }

    /// Azimuthal angle.
    pub fn phi(&self) -> f64 {
        self.phi
    }

    /// Invariant mass.
    pub fn mass(&self) -> f64 {
        self.mass
    }

    /// Cartesian x-component of momentum.
    pub fn px(&self) -> f64 {
        self.pt * self.phi.cos()
    }

    /// Cartesian y-component of momentum.
    pub fn py(&self) -> f64 {
        self.pt * self.phi.sin()
    }

    /// Cartesian z-component of momentum.
    pub fn pz(&self) -> f64 {
        self.pt * self.eta.sinh()
    }
}

/// Capability of producing a four-momentum.
///
/// This is the single seam through which the event table sees upstream
/// objects; implement it for your reconstruction framework's types to feed
/// them to `add_photon` / `add_jet` directly.
pub trait HasFourMomentum {
    /// The object's kinematic descriptor.
    fn four_momentum(&self) -> FourMomentum;
}

impl HasFourMomentum for FourMomentum {
    fn four_momentum(&self) -> FourMomentum {
        *self
    }
}

impl<T: HasFourMomentum + ?Sized> HasFourMomentum for &T {
    fn four_momentum(&self) -> FourMomentum {
        (**self).four_momentum()
    }
}

/// A clustered jet holding Cartesian components, as produced by a jet
/// clustering step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClusteredJet {
    px: f64,
    py: f64,
    pz: f64,
    energy: f64,
}

impl ClusteredJet {
    /// Create a jet from Cartesian (px, py, pz, E) components.
    pub fn new(px: f64, py: f64, pz: f64, energy: f64) -> Self {
        Self {
            px,
            py,
            pz,
            energy,
        }
    }

    /// Transverse momentum.
    pub fn pt(&self) -> f64 {
        self.px.hypot(self.py)
    }

    /// Pseudorapidity.
    pub fn eta(&self) -> f64 {
        self.four_momentum().eta()
    }

    /// Azimuthal angle.
    pub fn phi(&self) -> f64 {
        self.four_momentum().phi()
    }

    /// Invariant mass.
    pub fn m(&self) -> f64 {
        self.four_momentum().mass()
    }

    /// Jet energy.
    pub fn e(&self) -> f64 {
        self.energy
    }
}

impl HasFourMomentum for ClusteredJet {
    fn four_momentum(&self) -> FourMomentum {
        FourMomentum::from_cartesian(self.px, self.py, self.pz, self.energy)
    }
}

/// A truth-particle record: kinematics plus generator status and PDG
/// identity.
pub trait TruthLike: HasFourMomentum {
    /// Generator status code.
    fn status(&self) -> i32;

    /// PDG particle identifier.
    fn pdg_id(&self) -> i32;
}

impl<T: TruthLike + ?Sized> TruthLike for &T {
    fn status(&self) -> i32 {
        (**self).status()
    }

    fn pdg_id(&self) -> i32 {
        (**self).pdg_id()
    }
}

/// A concrete truth-particle value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TruthParticle {
    /// The particle's four-momentum
    pub p4: FourMomentum,
    /// Generator status code
    pub status: i32,
    /// PDG particle identifier
    pub pdg_id: i32,
}

impl TruthParticle {
    /// Create a truth particle from its four-momentum and identity.
    pub fn new(p4: FourMomentum, status: i32, pdg_id: i32) -> Self {
        Self { p4, status, pdg_id }
    }
}

impl HasFourMomentum for TruthParticle {
    fn four_momentum(&self) -> FourMomentum {
        self.p4
    }
}

impl TruthLike for TruthParticle {
    fn status(&self) -> i32 {
        self.status
    }

    fn pdg_id(&self) -> i32 {
        self.pdg_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cartesian_conversion() {
        // pt=3, phi=pi/2, massless and central
        let p4 = FourMomentum::from_cartesian(0.0, 3.0, 0.0, 3.0);
        assert!((p4.pt() - 3.0).abs() < 1e-12);
        assert!((p4.phi() - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
        assert!(p4.eta().abs() < 1e-12);
        assert!(p4.mass().abs() < 1e-6);
    }

    #[test]
    fn test_cartesian_roundtrip() {
        let p4 = FourMomentum::new(45.0, 1.2, -0.7, 10.0);
        let back = FourMomentum::from_cartesian(
            p4.px(),
            p4.py(),
            p4.pz(),
            (p4.px().powi(2) + p4.py().powi(2) + p4.pz().powi(2) + p4.mass().powi(2)).sqrt(),
        );
        assert!((back.pt() - 45.0).abs() < 1e-9);
        assert!((back.eta() - 1.2).abs() < 1e-9);
        assert!((back.phi() + 0.7).abs() < 1e-9);
        assert!((back.mass() - 10.0).abs() < 1e-6);
    }

    #[test]
    fn test_clustered_jet_accessors() {
        let jet = ClusteredJet::new(30.0, 40.0, 0.0, 55.0);
        assert!((jet.pt() - 50.0).abs() < 1e-12);
        assert!(jet.eta().abs() < 1e-12);
        // m^2 = 55^2 - 50^2 = 525
        assert!((jet.m() - 525.0_f64.sqrt()).abs() < 1e-9);
    }

    #[test]
    fn test_reference_blanket_impl() {
        let p4 = FourMomentum::new(1.0, 0.0, 0.0, 0.0);
        let by_ref: &FourMomentum = &p4;
        assert_eq!(by_ref.four_momentum(), p4);

        let truth = TruthParticle::new(p4, 1, 22);
        let handle: &TruthParticle = &truth;
        assert_eq!(handle.pdg_id(), 22);
    }
}
