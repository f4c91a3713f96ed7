//! Preview server for the generated site

use anyhow::Result;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse};
use axum::routing::get;
use axum::Router;
use std::net::SocketAddr;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::Penna;

/// Start the preview server.
///
/// Serves the public directory as-is; any route without a matching
/// file gets the generated 404.html with a 404 status, the same way
/// static hosts treat the fallback document.
pub async fn start(site: &Penna, ip: &str, port: u16) -> Result<()> {
    let public_dir = site.public_dir.clone();
    let not_found_page = public_dir.join("404.html");

    let fallback = get(move || {
        let page = not_found_page.clone();
        async move {
            match tokio::fs::read_to_string(&page).await {
                Ok(body) => (StatusCode::NOT_FOUND, Html(body)).into_response(),
                Err(_) => (StatusCode::NOT_FOUND, "Page Not Found").into_response(),
            }
        }
    });

    let app = Router::new()
        .fallback_service(ServeDir::new(&public_dir).not_found_service(fallback))
        .layer(TraceLayer::new_for_http());

    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    println!("Serving {:?}", public_dir);
    println!("Server running at http://{}:{}", ip, port);
    println!("Press Ctrl+C to stop.");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
