use serde::{Deserialize, Serialize};
use sheckles_core::{
    appraise, estimate_mass, parse_price, ActiveModifiers, Appraisal, Catalog, CropDef,
    EstimateRequest, MassEstimate, ModifierDef, ModifierKey, ModifierSelection, MutationResolver,
    Notice, NoticeLog, Selection, ToggleOutcome, ValuationError,
};

#[derive(Debug, Serialize)]
pub struct ApiResponse {
    pub ok: bool,
    pub error: Option<String>,
    pub result: Option<serde_json::Value>,
}

#[derive(Debug)]
pub struct ApiReply {
    pub status: u16,
    pub body: ApiResponse,
}

fn default_amount() -> u32 {
    1
}

#[derive(Debug, Deserialize)]
struct PriceBody {
    crop: String,
    mass: f64,
    #[serde(default)]
    modifiers: Vec<String>,
    #[serde(default)]
    friends: u8,
    #[serde(default = "default_amount")]
    amount: u32,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PriceInput {
    Number(f64),
    Text(String),
}

#[derive(Debug, Deserialize)]
struct EstimateBody {
    crop: String,
    target_price: PriceInput,
    #[serde(default)]
    modifiers: Vec<String>,
    #[serde(default)]
    friends: u8,
    #[serde(default = "default_amount")]
    amount: u32,
}

#[derive(Debug, Deserialize)]
struct ToggleBody {
    #[serde(default)]
    active: Vec<String>,
    key: String,
    enable: bool,
}

#[derive(Serialize)]
struct CatalogView<'a> {
    crops: &'a [CropDef],
    modifiers: &'a [ModifierDef],
}

#[derive(Serialize)]
struct PriceResult {
    appraisal: Appraisal,
    notices: Vec<Notice>,
}

#[derive(Serialize)]
struct EstimateResult {
    estimate: MassEstimate,
    display: String,
    notices: Vec<Notice>,
}

#[derive(Serialize)]
struct ToggleResult {
    active: ActiveModifiers,
    outcome: String,
    notices: Vec<Notice>,
}

pub fn catalog_reply(catalog: &Catalog) -> ApiReply {
    respond(Ok(CatalogView {
        crops: catalog.crops(),
        modifiers: catalog.modifiers(),
    }))
}

pub fn price_reply(catalog: &Catalog, body: &str) -> ApiReply {
    respond(parse_body::<PriceBody>(body).and_then(|req| price(catalog, req)))
}

pub fn estimate_reply(catalog: &Catalog, body: &str) -> ApiReply {
    respond(parse_body::<EstimateBody>(body).and_then(|req| estimate(catalog, req)))
}

pub fn toggle_reply(catalog: &Catalog, body: &str) -> ApiReply {
    respond(parse_body::<ToggleBody>(body).and_then(|req| toggle(catalog, req)))
}

pub fn not_found() -> ApiReply {
    ApiReply {
        status: 404,
        body: ApiResponse {
            ok: false,
            error: Some("not found".to_string()),
            result: None,
        },
    }
}

fn price(catalog: &Catalog, req: PriceBody) -> Result<PriceResult, ValuationError> {
    let mut notices = NoticeLog::default();
    let modifiers = modifier_selection(catalog, &req.modifiers, &mut notices)?
        .with_friends(req.friends)
        .with_amount(req.amount);
    let selection = Selection::new(req.crop, req.mass).with_modifiers(modifiers);
    let appraisal = appraise(catalog, &selection)?;
    Ok(PriceResult {
        appraisal,
        notices: notices.drain().collect(),
    })
}

fn estimate(catalog: &Catalog, req: EstimateBody) -> Result<EstimateResult, ValuationError> {
    let target_price = match &req.target_price {
        PriceInput::Number(value) => *value,
        PriceInput::Text(raw) => parse_price(raw)?,
    };
    let mut notices = NoticeLog::default();
    let modifiers = modifier_selection(catalog, &req.modifiers, &mut notices)?
        .with_friends(req.friends)
        .with_amount(req.amount);
    let request = EstimateRequest::new(req.crop, target_price).with_modifiers(modifiers);
    let estimate = estimate_mass(catalog, &request)?;
    Ok(EstimateResult {
        display: estimate.to_string(),
        estimate,
        notices: notices.drain().collect(),
    })
}

fn toggle(catalog: &Catalog, req: ToggleBody) -> Result<ToggleResult, ValuationError> {
    let resolver = MutationResolver::new(catalog);
    let mut notices = NoticeLog::default();
    let keys = known_keys(catalog, &req.active)?;
    let mut active = resolver.resolve(keys.iter(), &mut notices);
    let key = known_key(catalog, &req.key)?;
    let outcome = resolver.toggle(&mut active, &key, req.enable, &mut notices);
    Ok(ToggleResult {
        active,
        outcome: outcome_name(&outcome).to_string(),
        notices: notices.drain().collect(),
    })
}

fn outcome_name(outcome: &ToggleOutcome) -> &'static str {
    match outcome {
        ToggleOutcome::Enabled => "enabled",
        ToggleOutcome::Disabled => "disabled",
        ToggleOutcome::Combined(_) => "combined",
        ToggleOutcome::Rejected => "rejected",
        ToggleOutcome::Unchanged => "unchanged",
    }
}

fn modifier_selection(
    catalog: &Catalog,
    names: &[String],
    notices: &mut NoticeLog,
) -> Result<ModifierSelection, ValuationError> {
    let keys = known_keys(catalog, names)?;
    let active = MutationResolver::new(catalog).resolve(keys.iter(), notices);
    Ok(ModifierSelection::from_active(&active, catalog))
}

fn known_keys(catalog: &Catalog, names: &[String]) -> Result<Vec<ModifierKey>, ValuationError> {
    names.iter().map(|name| known_key(catalog, name)).collect()
}

fn known_key(catalog: &Catalog, name: &str) -> Result<ModifierKey, ValuationError> {
    catalog
        .find_modifier(name)
        .map(|def| def.key.clone())
        .ok_or_else(|| ValuationError::InvalidInput(format!("unknown modifier {name:?}")))
}

fn parse_body<T: for<'de> Deserialize<'de>>(body: &str) -> Result<T, ValuationError> {
    serde_json::from_str(body)
        .map_err(|err| ValuationError::InvalidInput(format!("bad request body: {err}")))
}

fn respond<T: Serialize>(result: Result<T, ValuationError>) -> ApiReply {
    let value = result.and_then(|value| {
        serde_json::to_value(value)
            .map_err(|err| ValuationError::InvalidInput(format!("serialize: {err}")))
    });
    match value {
        Ok(value) => ApiReply {
            status: 200,
            body: ApiResponse {
                ok: true,
                error: None,
                result: Some(value),
            },
        },
        Err(err) => ApiReply {
            status: status_for(&err),
            body: ApiResponse {
                ok: false,
                error: Some(err.to_string()),
                result: None,
            },
        },
    }
}

fn status_for(err: &ValuationError) -> u16 {
    match err {
        ValuationError::InvalidInput(_) => 400,
        _ => 422,
    }
}
