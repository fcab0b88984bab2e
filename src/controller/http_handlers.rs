use actix_web::web::{self, Data};
use actix_web::{HttpResponse, Responder};
use serde_json::json;
use std::collections::HashMap;

use super::scorekeeper::{Scorekeeper, SetupUpdate};
use crate::error::AppError;
use crate::model::{GAME_SLOTS, Side};
use crate::view::{DEFAULT_INDEX_TITLE, render_app, render_index_template, render_scorecard};

/// Registers every route on an app or scope.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(index))
        .route("/app", web::get().to(app_fragment))
        .route("/games.json", web::get().to(games_json))
        .route("/games/{game}", web::get().to(scorecard))
        .route("/games/{game}/select", web::post().to(select))
        .route("/games/{game}/setup", web::post().to(setup))
        .route("/games/{game}/start", web::post().to(start))
        .route("/games/{game}/reset", web::post().to(reset))
        .route("/games/{game}/holes/{hole}", web::post().to(hole_setup))
        .route(
            "/games/{game}/holes/{hole}/{side}/{delta}",
            web::post().to(adjust_strokes),
        )
        .route("/health", web::get().to(HttpResponse::Ok));
}

/// Full page. `?game=N` shows slot N for this response only; the shared
/// selection changes through `POST games/{g}/select`.
pub async fn index(
    query: web::Query<HashMap<String, String>>,
    keeper: Data<Scorekeeper>,
) -> impl Responder {
    let active = match query.get("game") {
        Some(game) => match game.trim().parse::<usize>() {
            Ok(i) if i < GAME_SLOTS => i,
            Ok(i) => return error_response(&AppError::NotFound(format!("game {i}"))),
            Err(_) => {
                return HttpResponse::BadRequest()
                    .json(json!({"error": "game parameter must be a slot number"}));
            }
        },
        None => keeper.active(),
    };
    let games = keeper.snapshot().await;
    let markup = render_index_template(DEFAULT_INDEX_TITLE, &games, active);
    html_response(markup)
}

pub async fn app_fragment(keeper: Data<Scorekeeper>) -> impl Responder {
    render_app_response(&keeper).await
}

pub async fn games_json(keeper: Data<Scorekeeper>) -> impl Responder {
    HttpResponse::Ok().json(keeper.snapshot().await)
}

pub async fn scorecard(path: web::Path<usize>, keeper: Data<Scorekeeper>) -> impl Responder {
    let index = path.into_inner();
    match keeper.game(index).await {
        Ok(game) => html_response(render_scorecard(index, &game)),
        Err(e) => error_response(&e),
    }
}

pub async fn select(path: web::Path<usize>, keeper: Data<Scorekeeper>) -> impl Responder {
    match keeper.select(path.into_inner()) {
        Ok(()) => render_app_response(&keeper).await,
        Err(e) => error_response(&e),
    }
}

pub async fn setup(
    path: web::Path<usize>,
    form: web::Form<HashMap<String, String>>,
    keeper: Data<Scorekeeper>,
) -> impl Responder {
    let update = match setup_from_form(&form) {
        Ok(update) => update,
        Err(e) => return error_response(&e),
    };
    match keeper.apply_setup(path.into_inner(), update).await {
        Ok(_) => render_app_response(&keeper).await,
        Err(e) => error_response(&e),
    }
}

pub async fn start(path: web::Path<usize>, keeper: Data<Scorekeeper>) -> impl Responder {
    match keeper.start(path.into_inner()).await {
        Ok(_) => render_app_response(&keeper).await,
        Err(e) => error_response(&e),
    }
}

pub async fn reset(path: web::Path<usize>, keeper: Data<Scorekeeper>) -> impl Responder {
    match keeper.reset(path.into_inner()).await {
        Ok(_) => render_app_response(&keeper).await,
        Err(e) => error_response(&e),
    }
}

pub async fn hole_setup(
    path: web::Path<(usize, usize)>,
    form: web::Form<HashMap<String, String>>,
    keeper: Data<Scorekeeper>,
) -> impl Responder {
    let (index, hole) = path.into_inner();
    let par = match parse_int(&form, "par") {
        Ok(v) => v,
        Err(e) => return error_response(&e),
    };
    let si = match parse_int(&form, "si") {
        Ok(v) => v,
        Err(e) => return error_response(&e),
    };
    match keeper.set_hole(index, hole, par, si).await {
        Ok(_) => render_app_response_for(&keeper, index).await,
        Err(e) => error_response(&e),
    }
}

pub async fn adjust_strokes(
    path: web::Path<(usize, usize, String, i32)>,
    keeper: Data<Scorekeeper>,
) -> impl Responder {
    let (index, hole, side, delta) = path.into_inner();
    let Some(side) = Side::from_slug(&side) else {
        return HttpResponse::BadRequest().json(json!({"error": "side must be red or blue"}));
    };
    match keeper.adjust_strokes(index, hole, side, delta).await {
        Ok(_) => render_app_response_for(&keeper, index).await,
        Err(e) => error_response(&e),
    }
}

async fn render_app_response(keeper: &Scorekeeper) -> HttpResponse {
    render_app_response_for(keeper, keeper.active()).await
}

// Score and hole edits come from the card on screen, so that card stays shown.
async fn render_app_response_for(keeper: &Scorekeeper, active: usize) -> HttpResponse {
    let games = keeper.snapshot().await;
    html_response(render_app(&games, active))
}

fn html_response(markup: maud::Markup) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html")
        .body(markup.into_string())
}

fn error_response(e: &AppError) -> HttpResponse {
    let body = json!({"error": e.to_string()});
    match e {
        AppError::NotFound(_) => HttpResponse::NotFound().json(body),
        AppError::Invalid(_) | AppError::Parse(_) => HttpResponse::BadRequest().json(body),
        AppError::Storage(_) => {
            tracing::error!("{e}");
            HttpResponse::InternalServerError().json(body)
        }
    }
}

/// Reads the setup fields that are present. Numbers must parse and be finite;
/// a blank number field is an error rather than a silent zero.
///
/// # Errors
///
/// Returns `AppError::Invalid` naming the first bad field.
pub fn setup_from_form(form: &HashMap<String, String>) -> Result<SetupUpdate, AppError> {
    Ok(SetupUpdate {
        red_name: form.get("redName").map(|s| s.trim().to_string()),
        blue_name: form.get("blueName").map(|s| s.trim().to_string()),
        red_index: parse_number(form, "redIndex")?,
        blue_index: parse_number(form, "blueIndex")?,
        rating: parse_number(form, "rating")?,
        slope: parse_number(form, "slope")?,
    })
}

fn parse_number(form: &HashMap<String, String>, key: &str) -> Result<Option<f64>, AppError> {
    let Some(raw) = form.get(key) else {
        return Ok(None);
    };
    match raw.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(Some(v)),
        _ => Err(AppError::Invalid(format!("{key} must be a number, got '{raw}'"))),
    }
}

fn parse_int(form: &HashMap<String, String>, key: &str) -> Result<Option<i32>, AppError> {
    let Some(raw) = form.get(key) else {
        return Ok(None);
    };
    raw.trim()
        .parse::<i32>()
        .map(Some)
        .map_err(|_| AppError::Invalid(format!("{key} must be a whole number, got '{raw}'")))
}
