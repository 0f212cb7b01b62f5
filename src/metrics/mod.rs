//! Graph metrics computed on generated networks.

pub mod rich_club;

pub use rich_club::{RichClubCurve, RichClubPoint, double_edge_swap, raw_coefficients, rich_club_coefficient};
