use serde::Serialize;

use crate::context::BlogContext;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PageMeta {
    pub title: String,
    pub description: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HomePage {
    pub meta: PageMeta,
}

/// Home page loader: ensures posts are loaded, exposes site metadata.
pub async fn load_home(ctx: &BlogContext) -> HomePage {
    ctx.ensure_loaded().await;
    let site = ctx.site();
    HomePage {
        meta: PageMeta {
            title: site.title.clone(),
            description: site.description.clone(),
        },
    }
}
