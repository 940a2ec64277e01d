use tracing::debug;

use quill_sync::FetchOutcome;

use crate::context::BlogContext;

/// Where the layout is being rendered.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderMode {
    /// Server-side or static generation: data must be present before render.
    Server,
    /// Interactive client: render immediately, fill the store in the
    /// background.
    Browser,
}

/// Root layout loader.
///
/// In [`RenderMode::Server`] it waits for the fetch and returns its outcome.
/// In [`RenderMode::Browser`] it starts the fetch on a background task and
/// returns `None` at once; observers of the store see the result when it
/// lands.
pub async fn load_layout(ctx: &BlogContext, mode: RenderMode) -> Option<FetchOutcome> {
    match mode {
        RenderMode::Server => Some(ctx.ensure_loaded().await),
        RenderMode::Browser => {
            let ctx = ctx.clone();
            tokio::spawn(async move {
                let outcome = ctx.ensure_loaded().await;
                debug!(?outcome, "background layout load finished");
            });
            None
        }
    }
}
