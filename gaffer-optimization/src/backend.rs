#[cfg(not(any(feature = "highs", feature = "coin_cbc")))]
compile_error!("a solver backend is required: enable the `highs` or `coin_cbc` feature");

/// Integer-programming backend behind the model. Selected once at
/// initialization, never per call; both backends see the exact same model.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SolverBackend {
    /// Preferred high-performance backend.
    #[cfg(feature = "highs")]
    Highs,
    /// Widely available open-source fallback.
    #[cfg(feature = "coin_cbc")]
    CoinCbc,
}

impl SolverBackend {
    /// The preferred backend when compiled in, the fallback otherwise.
    #[cfg(feature = "highs")]
    pub fn select() -> Self {
        SolverBackend::Highs
    }

    #[cfg(not(feature = "highs"))]
    pub fn select() -> Self {
        SolverBackend::CoinCbc
    }

    pub fn name(self) -> &'static str {
        match self {
            #[cfg(feature = "highs")]
            SolverBackend::Highs => "highs",
            #[cfg(feature = "coin_cbc")]
            SolverBackend::CoinCbc => "cbc",
        }
    }
}

impl Default for SolverBackend {
    fn default() -> Self {
        Self::select()
    }
}
