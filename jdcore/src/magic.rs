/// Depth bound used by the solve step when no configuration overrides it.
pub const DEFAULT_DEPTH_BOUND: usize = 5;

/// Width used when rendering proofs into an output sink.
pub const DEFAULT_RENDER_WIDTH: usize = 80;

/// Name of the environment variable containing the path to the solver configuration file.
/// If not set, defaults to
///  (1) on Linux and macOS: `$XDG_CONFIG_HOME/jdsolve/solve.toml` or `$HOME/.config/jdsolve/solve.toml`
///  (2) on Windows: `%APPDATA%\jdsolve\solve.toml`
pub const ENV_SOLVE_CONFIG_PATH: &str = "JD_SOLVE_CONFIG_PATH";

/// Warning emitted after every successful solve step.
pub const MSG_SOLVE_UNRELIABLE: &str = "proof by solve is not reliable";

/// Error emitted when the search is exhausted.
pub const MSG_SOLVE_FAILED: &str = "Unable to find proof";

/// Suffix printed after a step justified by proof search.
pub const BY_SOLVE_CLAUSE: &str = " by solve";
