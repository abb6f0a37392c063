//! Quotation service providing the full create/read/update/delete and query
//! surface over a record store.

use std::sync::Arc;

use chrono::Utc;
use common::RecordId;
use mirror::{StatePublisher, StateSynchronizer};
use record_store::{
    CounterStore, PendingRecord, RecordStore, RecordStoreExt, SaveOptions, StoredRecord,
};

use crate::config::ServiceConfig;
use crate::error::DomainError;
use crate::fault::FaultReporter;
use crate::record::Record;
use crate::search::{SearchField, filter};
use crate::sequence::SequenceNumberGenerator;

use super::{
    ItemId, LineItem, NewQuotation, Quotation, QuotationPatch, QuotationStatistics,
    QuotationStatus, calculate_total, ensure_valid, summarize,
};

type Result<T> = std::result::Result<T, DomainError>;

/// Service for managing quotations.
///
/// Every mutation validates before writing, keeps `total_amount` in step with
/// the items, and republishes the whole collection to the read mirror once
/// the write is committed.
///
/// Faults are always handed to the [`FaultReporter`]. List and aggregate
/// queries then recover with an empty or zeroed result; mutations return
/// the error to the caller, except `delete`, which answers `false`.
pub struct QuotationService<S> {
    store: S,
    sequence: SequenceNumberGenerator,
    synchronizer: StateSynchronizer,
    reporter: Arc<dyn FaultReporter>,
    config: ServiceConfig,
}

impl<S> QuotationService<S>
where
    S: RecordStore + CounterStore + Clone + 'static,
{
    /// Creates a new quotation service.
    ///
    /// The store also backs the sequence counter. The collection is
    /// published through `publisher` under `config.mirror_key`.
    pub fn new(
        store: S,
        publisher: Arc<dyn StatePublisher>,
        reporter: Arc<dyn FaultReporter>,
        config: ServiceConfig,
    ) -> Self {
        let sequence = SequenceNumberGenerator::new(
            Arc::new(store.clone()),
            reporter.clone(),
            config.sequence.clone(),
        );
        let synchronizer = StateSynchronizer::new(publisher, config.mirror_key.clone());

        Self {
            store,
            sequence,
            synchronizer,
            reporter,
            config,
        }
    }

    /// Returns a reference to the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Returns the read mirror the collection is published to.
    pub fn mirror(&self) -> &StateSynchronizer {
        &self.synchronizer
    }

    /// Returns the service configuration.
    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// Creates a quotation.
    ///
    /// Allocates the next sequence number, applies the creation defaults
    /// and computes the total before validating. Nothing is written if
    /// validation fails.
    #[tracing::instrument(skip(self, new), fields(parent_ref = %new.parent_ref))]
    pub async fn create(&self, new: NewQuotation) -> Result<Quotation> {
        let result = self.try_create(new).await;
        self.reported(result, "QuotationService.create")
    }

    async fn try_create(&self, new: NewQuotation) -> Result<Quotation> {
        let sequence_number = self.sequence.next(Quotation::kind()).await;
        let quotation = Quotation::from_new(RecordId::new(), sequence_number, new, Utc::now());
        ensure_valid(&quotation)?;

        let stored = self.save(&quotation, SaveOptions::expect_new()).await?;

        metrics::counter!("quotations_created").increment(1);
        tracing::info!(
            id = %stored.id(),
            sequence_number = %stored.sequence_number(),
            "quotation created"
        );

        self.refresh_mirror("QuotationService.create").await;
        Ok(stored)
    }

    /// Applies a shallow patch to an existing quotation.
    ///
    /// Fails with a conflict if the quotation was changed by someone else
    /// between the load and the save.
    #[tracing::instrument(skip(self, patch))]
    pub async fn update(&self, id: RecordId, patch: QuotationPatch) -> Result<Quotation> {
        let result = self.try_update(id, patch).await;
        self.reported(result, "QuotationService.update")
    }

    async fn try_update(&self, id: RecordId, patch: QuotationPatch) -> Result<Quotation> {
        let mut quotation = self.load(id).await?;
        quotation.apply_patch(patch, Utc::now());
        self.commit(quotation, "QuotationService.update").await
    }

    /// Appends a line item and recomputes the total.
    ///
    /// Fails with `DuplicateItem` if the quotation already has an item with
    /// the same ID.
    #[tracing::instrument(skip(self, item), fields(item_id = %item.id))]
    pub async fn add_item(&self, id: RecordId, item: LineItem) -> Result<Quotation> {
        let result = self.try_add_item(id, item).await;
        self.reported(result, "QuotationService.add_item")
    }

    async fn try_add_item(&self, id: RecordId, item: LineItem) -> Result<Quotation> {
        let mut quotation = self.load(id).await?;
        if quotation.get_item(item.id).is_some() {
            return Err(DomainError::DuplicateItem {
                id,
                item_id: item.id,
            });
        }

        let mut items = quotation.items().to_vec();
        items.push(item);
        quotation.apply_patch(QuotationPatch::items(items), Utc::now());

        self.commit(quotation, "QuotationService.add_item").await
    }

    /// Removes a line item and recomputes the total.
    #[tracing::instrument(skip(self))]
    pub async fn remove_item(&self, id: RecordId, item_id: ItemId) -> Result<Quotation> {
        let result = self.try_remove_item(id, item_id).await;
        self.reported(result, "QuotationService.remove_item")
    }

    async fn try_remove_item(&self, id: RecordId, item_id: ItemId) -> Result<Quotation> {
        let mut quotation = self.load(id).await?;
        if quotation.get_item(item_id).is_none() {
            return Err(DomainError::ItemNotFound { id, item_id });
        }

        let items = quotation
            .items()
            .iter()
            .filter(|item| item.id != item_id)
            .cloned()
            .collect();
        quotation.apply_patch(QuotationPatch::items(items), Utc::now());

        self.commit(quotation, "QuotationService.remove_item").await
    }

    /// Deletes a quotation.
    ///
    /// Returns false if the quotation does not exist or could not be
    /// deleted; the cause is reported. Its sequence number is never
    /// issued again.
    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, id: RecordId) -> bool {
        match self.try_delete(id).await {
            Ok(()) => true,
            Err(e) => {
                self.reporter.report(&e, "QuotationService.delete");
                false
            }
        }
    }

    async fn try_delete(&self, id: RecordId) -> Result<()> {
        if !self.store.exists(Quotation::kind(), id).await? {
            return Err(DomainError::NotFound {
                kind: Quotation::kind(),
                id,
            });
        }
        self.store.delete(Quotation::kind(), id).await?;

        metrics::counter!("quotations_deleted").increment(1);
        tracing::info!(%id, "quotation deleted");

        self.refresh_mirror("QuotationService.delete").await;
        Ok(())
    }

    /// Loads a quotation by ID.
    ///
    /// Store faults are reported; an absent ID is returned as `NotFound`
    /// without being reported.
    #[tracing::instrument(skip(self))]
    pub async fn get_by_id(&self, id: RecordId) -> Result<Quotation> {
        let result = self.load(id).await;
        if let Err(e) = &result
            && !e.is_not_found()
        {
            self.reporter.report(e, "QuotationService.get_by_id");
        }
        result
    }

    /// Returns every quotation in store order.
    #[tracing::instrument(skip(self))]
    pub async fn get_all(&self) -> Vec<Quotation> {
        self.recovered(self.load_all().await, "QuotationService.get_all")
    }

    /// Returns the quotations whose `field` contains `query`, ignoring case.
    #[tracing::instrument(skip(self))]
    pub async fn search(&self, query: &str, field: &SearchField) -> Vec<Quotation> {
        let result = self
            .load_all()
            .await
            .map(|all| filter(&all, query, field));
        self.recovered(result, "QuotationService.search")
    }

    /// Returns the quotations issued under a project.
    #[tracing::instrument(skip(self))]
    pub async fn get_by_parent(&self, parent_ref: &str) -> Vec<Quotation> {
        let result = self.load_all().await.map(|all| {
            all.into_iter()
                .filter(|q| q.parent_ref() == parent_ref)
                .collect()
        });
        self.recovered(result, "QuotationService.get_by_parent")
    }

    /// Returns the quotations with the given status.
    #[tracing::instrument(skip(self))]
    pub async fn get_by_status(&self, status: QuotationStatus) -> Vec<Quotation> {
        let result = self
            .load_all()
            .await
            .map(|all| all.into_iter().filter(|q| q.status() == status).collect());
        self.recovered(result, "QuotationService.get_by_status")
    }

    /// Returns the most recently created quotations, newest first.
    ///
    /// `None` uses the configured default limit.
    #[tracing::instrument(skip(self))]
    pub async fn get_recent(&self, limit: Option<usize>) -> Vec<Quotation> {
        let limit = limit.unwrap_or(self.config.recent_limit);
        let result = self
            .load_all()
            .await
            .map(|all| most_recent(all, limit));
        self.recovered(result, "QuotationService.get_recent")
    }

    /// Summarizes the whole collection.
    #[tracing::instrument(skip(self))]
    pub async fn get_statistics(&self) -> QuotationStatistics {
        let result = self.load_all().await.map(|all| summarize(&all));
        self.recovered(result, "QuotationService.get_statistics")
    }

    /// Computes the total a set of items would have, without saving.
    pub fn calculate_total(&self, items: &[LineItem]) -> f64 {
        calculate_total(items)
    }

    /// Reloads the collection and republishes it to the read mirror.
    #[tracing::instrument(skip(self))]
    pub async fn sync_mirror(&self) -> Result<()> {
        let all = self.load_all().await?;
        self.synchronizer.publish(&all).await?;
        Ok(())
    }

    // Internal helpers

    async fn load(&self, id: RecordId) -> Result<Quotation> {
        match self.store.load(Quotation::kind(), id).await? {
            Some(record) => decode(&record),
            None => Err(DomainError::NotFound {
                kind: Quotation::kind(),
                id,
            }),
        }
    }

    async fn load_all(&self) -> Result<Vec<Quotation>> {
        self.store
            .load_all(Quotation::kind())
            .await?
            .iter()
            .map(decode)
            .collect()
    }

    /// Validates and saves a quotation loaded from the store, expecting the
    /// version it was loaded at.
    async fn commit(&self, quotation: Quotation, context: &str) -> Result<Quotation> {
        ensure_valid(&quotation)?;

        let options = SaveOptions::expect_version(quotation.version());
        let stored = self.save(&quotation, options).await?;

        self.refresh_mirror(context).await;
        Ok(stored)
    }

    async fn save(&self, quotation: &Quotation, options: SaveOptions) -> Result<Quotation> {
        let record = PendingRecord::from_entity(Quotation::kind(), quotation.id(), quotation)?;
        let stored = self.store.save(record, options).await?;
        decode(&stored)
    }

    /// The write is already committed here, so a failed refresh is reported
    /// and left for the next mutation to correct.
    async fn refresh_mirror(&self, context: &str) {
        if let Err(e) = self.sync_mirror().await {
            tracing::warn!(context, error = %e, "mirror refresh failed");
            self.reporter.report(&e, context);
        }
    }

    fn reported<T>(&self, result: Result<T>, context: &str) -> Result<T> {
        if let Err(e) = &result {
            self.reporter.report(e, context);
        }
        result
    }

    fn recovered<T: Default>(&self, result: Result<T>, context: &str) -> T {
        result.unwrap_or_else(|e| {
            self.reporter.report(&e, context);
            T::default()
        })
    }
}

fn decode(record: &StoredRecord) -> Result<Quotation> {
    let mut quotation: Quotation = record.decode()?;
    quotation.set_version(record.version);
    Ok(quotation)
}

/// Newest first: creation time descending, then sequence number
/// descending, then ID.
fn most_recent(mut collection: Vec<Quotation>, limit: usize) -> Vec<Quotation> {
    collection.sort_by(|a, b| {
        b.created_at()
            .cmp(&a.created_at())
            .then_with(|| b.sequence_number().cmp(a.sequence_number()))
            .then_with(|| b.id().cmp(&a.id()))
    });
    collection.truncate(limit);
    collection
}
