mod command;
mod repl;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::ui;

use repl::Session;

/// Handle `lifeboat session` on stdin/stdout.
pub fn handle(ctx: &mut AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let stdin = std::io::stdin().lock();
    let stdout = std::io::stdout().lock();
    Session::new(ctx, stdin, stdout, flags.format, ui::prefs().color).run()
}
