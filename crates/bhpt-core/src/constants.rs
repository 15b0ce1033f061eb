/// Newtonian gravitational constant (m³ kg⁻¹ s⁻²)
pub const G_SI: f64 = 6.674_30e-11;

/// Speed of light in vacuum (m/s)
pub const C_SI: f64 = 299_792_458.0;

/// Nominal solar mass (kg)
pub const MSUN_SI: f64 = 1.988_409_870_698_051e30;

/// Parsec (m)
pub const PC_SI: f64 = 3.085_677_581_491_367e16;

/// Megaparsec (m)
pub const MPC_SI: f64 = PC_SI * 1.0e6;

/// Geometric time unit of one solar mass: G·M☉/c³ (s)
pub fn solar_mass_time() -> f64 {
    G_SI * MSUN_SI / (C_SI * C_SI * C_SI)
}
