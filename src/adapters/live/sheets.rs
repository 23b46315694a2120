//! Live adapter for the sheets port using the Google Sheets v4 API.
//!
//! Ranges deliberately omit a sheet name so the API targets the first
//! visible worksheet, matching the destination template's layout. The
//! bearer token comes from the `ROSTER_ACCESS_TOKEN` environment
//! variable; the credential file supplies the service identity. Failure
//! classification happens here, at the boundary: transport errors become
//! [`Error::Network`], `PERMISSION_DENIED` responses become
//! [`Error::PermissionDenied`], everything else [`Error::Api`].

use std::path::Path;

use reqwest::blocking::{Client, Response};
use serde::{Deserialize, Serialize};

use crate::credentials::ServiceCredentials;
use crate::error::{Error, Result};
use crate::ports::{SheetProvider, SheetSession, Worksheet};

const SHEETS_API_URL: &str = "https://sheets.googleapis.com/v4/spreadsheets";
const TOKEN_ENV_VAR: &str = "ROSTER_ACCESS_TOKEN";

/// Column span wide enough for any sheet this tool writes.
const FULL_WIDTH: &str = "A:ZZ";

/// Live spreadsheet provider.
pub struct SheetsApi {
    base_url: String,
}

impl SheetsApi {
    /// Creates a provider against the public Sheets endpoint.
    #[must_use]
    pub fn new() -> Self {
        Self { base_url: SHEETS_API_URL.to_string() }
    }
}

impl Default for SheetsApi {
    fn default() -> Self {
        Self::new()
    }
}

/// Value range payload used by reads, writes, and appends.
#[derive(Debug, Serialize, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<String>>,
}

/// Spreadsheet metadata subset fetched on open.
#[derive(Debug, Deserialize)]
struct SpreadsheetMeta {
    properties: SpreadsheetProperties,
}

/// Top-level spreadsheet properties.
#[derive(Debug, Deserialize)]
struct SpreadsheetProperties {
    title: String,
}

/// Error response body from the Sheets API.
#[derive(Debug, Deserialize)]
struct ApiError {
    error: ApiErrorDetail,
}

/// Detail inside a Sheets API error response.
#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    #[serde(default)]
    code: u16,
    #[serde(default)]
    message: String,
    #[serde(default)]
    status: String,
}

/// Extracts the spreadsheet ID from a locator.
///
/// Accepts a full `https://docs.google.com/spreadsheets/d/<id>/...` URL
/// or a bare spreadsheet ID.
#[must_use]
pub fn spreadsheet_id(locator: &str) -> String {
    match locator.split_once("/d/") {
        Some((_, rest)) => rest.split(['/', '?', '#']).next().unwrap_or(rest).to_string(),
        None => locator.trim().to_string(),
    }
}

/// Converts a 0-based column index to its A1 letter form.
#[must_use]
pub fn column_letter(index: usize) -> String {
    let mut letters = Vec::new();
    let mut n = index + 1;
    while n > 0 {
        let rem = (n - 1) % 26;
        letters.push(char::from(b'A' + u8::try_from(rem).unwrap_or(0)));
        n = (n - 1) / 26;
    }
    letters.iter().rev().collect()
}

fn network_error(err: &reqwest::Error) -> Error {
    Error::Network { message: err.to_string() }
}

/// Maps a non-success API response onto the error taxonomy using the
/// body's structured status, not the message text.
fn classify_response(response: Response) -> Error {
    let http_status = response.status();
    let detail = response
        .json::<ApiError>()
        .map(|body| body.error)
        .unwrap_or_else(|_| ApiErrorDetail {
            code: http_status.as_u16(),
            message: http_status.to_string(),
            status: String::new(),
        });

    if detail.status == "PERMISSION_DENIED" || http_status.as_u16() == 403 {
        let status = if detail.status.is_empty() { "PERMISSION_DENIED".to_string() } else { detail.status };
        return Error::PermissionDenied { status };
    }
    let status = if detail.status.is_empty() {
        detail.code.to_string()
    } else {
        detail.status
    };
    Error::Api { status, message: detail.message }
}

impl SheetProvider for SheetsApi {
    fn authenticate(&self, credential_path: &Path) -> Result<Box<dyn SheetSession>> {
        // Parsing the credential up front validates it before any
        // network traffic happens.
        ServiceCredentials::load(credential_path)?;
        let token = std::env::var(TOKEN_ENV_VAR).map_err(|_| Error::Credential {
            path: credential_path.display().to_string(),
            message: format!("{TOKEN_ENV_VAR} environment variable not set"),
        })?;
        Ok(Box::new(LiveSession {
            client: Client::new(),
            token,
            base_url: self.base_url.clone(),
        }))
    }
}

struct LiveSession {
    client: Client,
    token: String,
    base_url: String,
}

impl SheetSession for LiveSession {
    fn open_by_locator(&self, locator: &str) -> Result<Box<dyn Worksheet>> {
        let id = spreadsheet_id(locator);
        let sheet = LiveWorksheet {
            client: self.client.clone(),
            token: self.token.clone(),
            base_url: self.base_url.clone(),
            spreadsheet_id: id,
            title: String::new(),
        };
        let meta: SpreadsheetMeta = sheet.get_json(&sheet.meta_url())?;
        Ok(Box::new(LiveWorksheet { title: meta.properties.title, ..sheet }))
    }
}

struct LiveWorksheet {
    client: Client,
    token: String,
    base_url: String,
    spreadsheet_id: String,
    title: String,
}

impl LiveWorksheet {
    fn meta_url(&self) -> String {
        format!("{}/{}?fields=properties.title", self.base_url, self.spreadsheet_id)
    }

    fn values_url(&self, range: &str) -> String {
        format!("{}/{}/values/{range}", self.base_url, self.spreadsheet_id)
    }

    fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T> {
        let response = self
            .client
            .get(url)
            .bearer_auth(&self.token)
            .send()
            .map_err(|e| network_error(&e))?;
        if !response.status().is_success() {
            return Err(classify_response(response));
        }
        response.json().map_err(|e| Error::Api {
            status: "DECODE".to_string(),
            message: e.to_string(),
        })
    }

    fn read_range(&self, range: &str) -> Result<Vec<Vec<String>>> {
        let body: ValueRange = self.get_json(&self.values_url(range))?;
        Ok(body.values)
    }

    fn post_empty(&self, url: &str) -> Result<()> {
        let response = self
            .client
            .post(url)
            .bearer_auth(&self.token)
            .json(&serde_json::json!({}))
            .send()
            .map_err(|e| network_error(&e))?;
        if response.status().is_success() {
            Ok(())
        } else {
            Err(classify_response(response))
        }
    }
}

impl Worksheet for LiveWorksheet {
    fn title(&self) -> String {
        self.title.clone()
    }

    fn header_row(&self) -> Result<Vec<String>> {
        let mut rows = self.read_range("1:1")?;
        Ok(if rows.is_empty() { Vec::new() } else { rows.swap_remove(0) })
    }

    fn read_column(&self, index: usize) -> Result<Vec<String>> {
        let letter = column_letter(index);
        let rows = self.read_range(&format!("{letter}2:{letter}"))?;
        Ok(rows.into_iter().map(|mut row| if row.is_empty() { String::new() } else { row.swap_remove(0) }).collect())
    }

    fn row_count(&self) -> Result<usize> {
        let rows = self.read_range(FULL_WIDTH)?;
        Ok(rows.len().saturating_sub(1))
    }

    fn clear_all(&self) -> Result<()> {
        self.post_empty(&format!("{}:clear", self.values_url(FULL_WIDTH)))
    }

    fn append_rows(&self, rows: Vec<Vec<String>>) -> Result<()> {
        let url = format!(
            "{}:append?valueInputOption=USER_ENTERED",
            self.values_url("A1")
        );
        let response = self
            .client
            .post(url)
            .bearer_auth(&self.token)
            .json(&ValueRange { values: rows })
            .send()
            .map_err(|e| network_error(&e))?;
        if response.status().is_success() {
            Ok(())
        } else {
            Err(classify_response(response))
        }
    }

    fn write_row(&self, index: usize, values: Vec<String>) -> Result<()> {
        let url = format!(
            "{}?valueInputOption=USER_ENTERED",
            self.values_url(&format!("A{index}"))
        );
        let response = self
            .client
            .put(url)
            .bearer_auth(&self.token)
            .json(&ValueRange { values: vec![values] })
            .send()
            .map_err(|e| network_error(&e))?;
        if response.status().is_success() {
            Ok(())
        } else {
            Err(classify_response(response))
        }
    }
}
