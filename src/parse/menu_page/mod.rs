pub mod fnwi;
pub mod het_gerecht;
pub mod radboud_umc;
pub mod refter;
