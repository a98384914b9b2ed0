//! Interactive terminal form.
//!
//! Contact fields accept empty input so that every missing field is reported
//! together by validation. Date, time and duration are checked while typing.

use cotizador_core::validation::{parse_service_date, parse_start_time, validate_duration};
use cotizador_core::{
    QuoteForm, DATE_FORMAT, EQUIPMENT_CATALOG, MAX_DURATION_HOURS, MIN_DURATION_HOURS, TIME_FORMAT,
};
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Input, MultiSelect};

use crate::error::{AppError, AppResult};

/// Confirm prompt that submits the form.
pub const SUBMIT_PROMPT: &str = "Generar cotización";

/// Asks for every field, starting from `previous`.
///
/// Returns `None` when the user declines to submit.
pub fn prompt_form(previous: &QuoteForm) -> AppResult<Option<QuoteForm>> {
    let theme = ColorfulTheme::default();

    let client_name = text(&theme, "Nombre del cliente", &previous.client_name)?;
    let email = text(&theme, "Correo electrónico", &previous.email)?;
    let phone = text(&theme, "Teléfono", &previous.phone)?;

    let date_input: String = Input::with_theme(&theme)
        .with_prompt("Fecha del servicio (dd/mm/aaaa)")
        .with_initial_text(previous.service_date.format(DATE_FORMAT).to_string())
        .validate_with(|input: &String| -> Result<(), String> {
            parse_service_date(input).map(|_| ()).map_err(|e| e.to_string())
        })
        .interact_text()?;

    let time_input: String = Input::with_theme(&theme)
        .with_prompt("Hora de inicio (HH:MM)")
        .with_initial_text(previous.start_time.format(TIME_FORMAT).to_string())
        .validate_with(|input: &String| -> Result<(), String> {
            parse_start_time(input).map(|_| ()).map_err(|e| e.to_string())
        })
        .interact_text()?;

    let duration_hours: u32 = Input::with_theme(&theme)
        .with_prompt(format!(
            "Duración estimada en horas ({MIN_DURATION_HOURS}-{MAX_DURATION_HOURS})"
        ))
        .default(previous.duration_hours)
        .validate_with(|hours: &u32| -> Result<(), String> {
            validate_duration(*hours).map_err(|e| e.to_string())
        })
        .interact_text()?;

    let defaults: Vec<bool> = EQUIPMENT_CATALOG
        .iter()
        .map(|item| previous.equipment.iter().any(|chosen| chosen == item))
        .collect();
    let selected = MultiSelect::with_theme(&theme)
        .with_prompt("Equipos solicitados (espacio para marcar)")
        .items(&EQUIPMENT_CATALOG)
        .defaults(&defaults)
        .interact()?;

    let form = QuoteForm {
        client_name,
        email,
        phone,
        service_date: parse_service_date(&date_input).map_err(|e| prompt_error(&e))?,
        start_time: parse_start_time(&time_input).map_err(|e| prompt_error(&e))?,
        duration_hours,
        equipment: selected
            .into_iter()
            .map(|i| EQUIPMENT_CATALOG[i].to_string())
            .collect(),
    };

    let submit = Confirm::with_theme(&theme)
        .with_prompt(SUBMIT_PROMPT)
        .default(true)
        .interact()?;

    Ok(submit.then_some(form))
}

fn text(theme: &ColorfulTheme, prompt: &str, initial: &str) -> AppResult<String> {
    Ok(Input::<String>::with_theme(theme)
        .with_prompt(prompt)
        .with_initial_text(initial)
        .allow_empty(true)
        .interact_text()?)
}

fn prompt_error(err: &dyn std::fmt::Display) -> AppError {
    AppError::Prompt(err.to_string())
}
