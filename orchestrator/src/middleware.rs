use warp::cors::Builder;

pub fn cors() -> Builder {
    warp::cors()
        .allow_any_origin()
        .allow_headers(vec!["Content-Type", "Accept", "Origin"])
        .allow_methods(vec!["GET", "POST", "OPTIONS"])
}
