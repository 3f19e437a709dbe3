pub mod footprints;
pub mod icons;
pub mod movement;
pub mod scanner;
pub mod terrain;

pub use footprints::*;
pub use icons::*;
pub use movement::*;
pub use scanner::*;
pub use terrain::*;
