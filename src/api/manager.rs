// src/api/manager.rs
//! One database, one schema snapshot, every read and write against it.

use super::{ensure_success, paginate, ApiRequest, Endpoint, NotionTransport};
use crate::constants::UNKNOWN_NAME;
use crate::error::{AppError, Result};
use crate::interpret::{RecordInterpreter, UserDirectory};
use crate::kanban::{compare_due_dates, Card, CardFilter};
use crate::model::{DatabaseSchema, OptionTable, Record, UserSummary};
use crate::mutation::{comment_payload, mention_segments, MutationBuilder};
use crate::types::{DatabaseId, FieldRegistry, PageId};
use serde_json::{json, Value};
use std::sync::Arc;

/// Reads and writes one Kanban database.
///
/// The schema and option table are fetched once by [`NotionManager::connect`]
/// and never refreshed; a column renamed or an option added remotely after
/// that is not seen until a new manager is connected.
pub struct NotionManager {
    transport: Arc<dyn NotionTransport>,
    database_id: DatabaseId,
    fields: FieldRegistry,
    schema: DatabaseSchema,
    options: OptionTable,
}

impl NotionManager {
    pub async fn connect(
        transport: Arc<dyn NotionTransport>,
        database_id: DatabaseId,
        fields: FieldRegistry,
    ) -> Result<Self> {
        let endpoint = Endpoint::Database(database_id.clone());
        let reply = transport.request(ApiRequest::get(endpoint.clone())).await?;
        let schema = DatabaseSchema::from_json(&ensure_success(&endpoint, reply)?)?;
        let options = OptionTable::from_schema(&schema);

        log::info!(
            "Loaded schema of database {}: {} properties, {} option fields",
            database_id,
            schema.len(),
            options.iter().count()
        );
        for tracked in fields.iter() {
            if schema.property_by_id(&tracked.id).is_none() {
                log::warn!(
                    "Tracked field '{}' ({}) is not in the database schema",
                    tracked.key,
                    tracked.id
                );
            }
        }

        Ok(Self {
            transport,
            database_id,
            fields,
            schema,
            options,
        })
    }

    pub fn database_id(&self) -> &DatabaseId {
        &self.database_id
    }

    pub fn schema(&self) -> &DatabaseSchema {
        &self.schema
    }

    pub fn option_table(&self) -> &OptionTable {
        &self.options
    }

    /// For options known to exist remotely but added after connecting.
    pub fn option_table_mut(&mut self) -> &mut OptionTable {
        &mut self.options
    }

    pub fn fields(&self) -> &FieldRegistry {
        &self.fields
    }

    async fn send(&self, request: ApiRequest) -> Result<Value> {
        let endpoint = request.endpoint.clone();
        let reply = self.transport.request(request).await?;
        ensure_success(&endpoint, reply)
    }

    // ---------------------------------------------------------------------
    // Reads
    // ---------------------------------------------------------------------

    pub async fn fetch_page(&self, page_id: &PageId) -> Result<Value> {
        self.send(ApiRequest::get(Endpoint::Page(page_id.clone())))
            .await
    }

    /// Validates the link shape before anything is sent.
    pub async fn fetch_page_from_url(&self, page_url: &str) -> Result<Value> {
        let page_id = PageId::from_page_url(page_url)?;
        self.fetch_page(&page_id).await
    }

    pub async fn fetch_blocks(&self, page_id: &PageId) -> Result<Vec<Value>> {
        paginate(
            self.transport.as_ref(),
            ApiRequest::get(Endpoint::BlockChildren(page_id.clone())),
        )
        .await
    }

    pub async fn fetch_comments(&self, page_id: &PageId) -> Result<Vec<Value>> {
        let request =
            ApiRequest::get(Endpoint::Comments).with_query("block_id", page_id.to_dashed());
        paginate(self.transport.as_ref(), request).await
    }

    pub async fn list_users(&self) -> Result<Vec<UserSummary>> {
        let raw = paginate(self.transport.as_ref(), ApiRequest::get(Endpoint::Users)).await?;
        raw.into_iter()
            .map(|user| serde_json::from_value(user).map_err(AppError::from))
            .collect()
    }

    /// Display name of a user, or "Unknown" when the user has none.
    pub async fn fetch_user_name(&self, user_id: &str) -> Result<String> {
        let user = self
            .send(ApiRequest::get(Endpoint::User(user_id.to_string())))
            .await?;
        Ok(user
            .get("name")
            .and_then(Value::as_str)
            .unwrap_or(UNKNOWN_NAME)
            .to_string())
    }

    /// All pages of the database, optionally narrowed by a Notion filter object.
    pub async fn query_database(&self, filter: Option<Value>) -> Result<Vec<Value>> {
        let body = match filter {
            Some(filter) => json!({ "filter": filter }),
            None => json!({}),
        };
        let request = ApiRequest::post(Endpoint::DatabaseQuery(self.database_id.clone()), body);
        paginate(self.transport.as_ref(), request).await
    }

    // ---------------------------------------------------------------------
    // Interpretation
    // ---------------------------------------------------------------------

    pub fn interpreter(&self) -> RecordInterpreter<'_> {
        RecordInterpreter::new(&self.schema, &self.fields, self)
    }

    pub async fn interpret(&self, raw: &Value, for_display: bool) -> Result<Record> {
        self.interpreter().interpret(raw, for_display).await
    }

    pub async fn interpret_all(&self, raws: &[Value], for_display: bool) -> Result<Vec<Record>> {
        self.interpreter().interpret_all(raws, for_display).await
    }

    /// Every card of the board matching `filter`, newest due date first.
    pub async fn fetch_cards(&self, filter: &CardFilter) -> Result<Vec<Card>> {
        let board = self.fetch_board(filter).await?;
        Ok(board.into_iter().map(|(card, _)| card).collect())
    }

    /// Like [`NotionManager::fetch_cards`], keeping each card's display record.
    pub async fn fetch_board(&self, filter: &CardFilter) -> Result<Vec<(Card, Record)>> {
        let pages = self.query_database(None).await?;
        let interpreter = self.interpreter();

        let mut board = Vec::with_capacity(pages.len());
        for page in &pages {
            let raw = interpreter.interpret(page, false).await?;
            let display = interpreter.interpret(page, true).await?;
            let card = Card::from_records(&raw, &display);
            if filter.matches(&card) {
                board.push((card, display));
            }
        }

        board.sort_by(|(a, _), (b, _)| compare_due_dates(a, b));
        log::debug!("{} of {} cards match", board.len(), pages.len());
        Ok(board)
    }

    // ---------------------------------------------------------------------
    // Writes
    // ---------------------------------------------------------------------

    fn mutations(&self) -> MutationBuilder<'_> {
        MutationBuilder::new(&self.schema, &self.options, &self.fields)
    }

    /// Sets a status or select column of a page to the named option.
    pub async fn update_option(
        &self,
        page_id: &PageId,
        field: &str,
        option_name: &str,
    ) -> Result<Value> {
        let payload = self.mutations().option_update(field, option_name)?;
        log::info!("Setting '{}' of page {} to '{}'", field, page_id, option_name);
        self.send(ApiRequest::patch(Endpoint::Page(page_id.clone()), payload))
            .await
    }

    pub async fn create_card(&self, title: &str, status: Option<&str>) -> Result<Value> {
        let payload = self
            .mutations()
            .card_creation(&self.database_id, title, status)?;
        log::info!("Creating card '{}' in database {}", title, self.database_id);
        self.send(ApiRequest::post(Endpoint::Pages, payload)).await
    }

    /// Posts `template` as a comment, with one mention per `@` marker.
    pub async fn add_comment(
        &self,
        page_id: &PageId,
        template: &str,
        mentions: &[String],
    ) -> Result<Value> {
        let segments = mention_segments(template, mentions);
        let payload = comment_payload(page_id, &segments);
        self.send(ApiRequest::post(Endpoint::Comments, payload))
            .await
    }
}

#[async_trait::async_trait]
impl UserDirectory for NotionManager {
    async fn user_name(&self, user_id: &str) -> Result<String> {
        self.fetch_user_name(user_id).await
    }
}
