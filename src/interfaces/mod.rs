/// Interfaces Layer - External Entry Points
///
/// Everything that talks to the engine from the outside lives here.
///
/// ## Modules
/// - `cli`: command-line interface (main.rs logic)
/// - `tools`: demo/test collaborators (mock asset gateway)

pub mod cli;
pub mod tools;
