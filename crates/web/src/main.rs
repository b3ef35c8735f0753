mod api;

use api::ApiReply;
use clap::{ArgAction, Parser};
use log::{debug, error, info};
use sheckles_core::Catalog;
use sheckles_data::{load_catalog_or_builtin, logging};
use std::io::Read;
use std::path::PathBuf;
use tiny_http::{Header, Method, Response, Server};

#[derive(Debug, Parser)]
#[command(name = "sheckles-web", version, about = "Crop price calculator JSON service")]
struct WebOptions {
    #[arg(long, default_value = "0.0.0.0:7878")]
    addr: String,
    /// Catalog JSON to use instead of the built-in one.
    #[arg(long)]
    catalog: Option<PathBuf>,
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let options = WebOptions::parse();
    logging::init(logging::level_for_verbosity(options.verbose.max(1)));
    if let Err(err) = serve(&options) {
        error!("{err:#}");
        std::process::exit(1);
    }
}

fn serve(options: &WebOptions) -> anyhow::Result<()> {
    let catalog = load_catalog_or_builtin(options.catalog.as_deref())?;
    let server = Server::http(&options.addr)
        .map_err(|err| anyhow::anyhow!("bind {}: {err}", options.addr))?;
    info!("sheckles web server on http://{}", options.addr);
    for request in server.incoming_requests() {
        if let Err(err) = handle_request(request, &catalog) {
            error!("request error: {err}");
        }
    }
    Ok(())
}

fn handle_request(
    mut request: tiny_http::Request,
    catalog: &Catalog,
) -> Result<(), Box<dyn std::error::Error>> {
    let url = request.url().to_string();
    debug!("{} {url}", request.method());
    let reply = match (request.method(), url.as_str()) {
        (&Method::Get, "/api/catalog") => api::catalog_reply(catalog),
        (&Method::Post, "/api/price") => api::price_reply(catalog, &read_body(&mut request)?),
        (&Method::Post, "/api/estimate") => {
            api::estimate_reply(catalog, &read_body(&mut request)?)
        }
        (&Method::Post, "/api/toggle") => api::toggle_reply(catalog, &read_body(&mut request)?),
        _ => api::not_found(),
    };
    respond_json(request, reply)
}

fn read_body(request: &mut tiny_http::Request) -> std::io::Result<String> {
    let mut body = String::new();
    request.as_reader().read_to_string(&mut body)?;
    Ok(body)
}

fn respond_json(
    request: tiny_http::Request,
    reply: ApiReply,
) -> Result<(), Box<dyn std::error::Error>> {
    let body = serde_json::to_vec_pretty(&reply.body)?;
    let header = Header::from_bytes(&b"Content-Type"[..], &b"application/json"[..])
        .map_err(|_| "invalid content type header")?;
    request.respond(
        Response::from_data(body)
            .with_header(header)
            .with_status_code(reply.status),
    )?;
    Ok(())
}
