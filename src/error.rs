//! Crate error type.

/// Failure of one of the two hardware seams.
///
/// Game-rule outcomes are never errors: rejected moves are silently
/// discarded and a blocked spawn flips the session into its terminal
/// game-over state. Only the pin layer can actually fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<DE, BE> {
    /// A display line (clock, data-out, select, mode, reset) refused to
    /// drive.
    Display(DE),
    /// A button line refused to read.
    Button(BE),
}
