use std::net::SocketAddr;

use anyhow::Context;

use crate::cli::root_commands::ServeArgs;
use crate::context::AppContext;

/// Handle `acre serve`.
pub async fn handle(args: &ServeArgs, ctx: &AppContext) -> anyhow::Result<()> {
    let addr: SocketAddr = match &args.bind {
        Some(bind) => bind
            .parse()
            .with_context(|| format!("invalid bind address '{bind}'"))?,
        None => ctx.config.server.socket_addr()?,
    };

    acre_server::serve(ctx.service.clone(), addr).await?;
    Ok(())
}
