//! Resource selection shared by the record commands.

use clap::ValueEnum;
use serde_json::Value;

use qbosdk::{Entity, QuickbooksOnline, Resource, Result};

/// Which resource client a command talks to.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResourceKind {
    Accounts,
    Departments,
    Classes,
    Employees,
}

/// A page window: 1-based start position and page size.
#[derive(Clone, Copy, Debug)]
pub struct Page {
    pub start: u32,
    pub max: u32,
}

/// List records, either one page or everything.
pub async fn list(
    qbo: &QuickbooksOnline,
    kind: ResourceKind,
    page: Option<Page>,
) -> Result<Vec<Value>> {
    match kind {
        ResourceKind::Accounts => list_in(qbo.accounts(), page).await,
        ResourceKind::Departments => list_in(qbo.departments(), page).await,
        ResourceKind::Classes => list_in(qbo.classes(), page).await,
        ResourceKind::Employees => list_in(qbo.employees(), page).await,
    }
}

/// Fetch one record by id.
pub async fn get(qbo: &QuickbooksOnline, kind: ResourceKind, id: &str) -> Result<Value> {
    match kind {
        ResourceKind::Accounts => qbo.accounts().get_by_id(id).await,
        ResourceKind::Departments => qbo.departments().get_by_id(id).await,
        ResourceKind::Classes => qbo.classes().get_by_id(id).await,
        ResourceKind::Employees => qbo.employees().get_by_id(id).await,
    }
}

/// Count records.
pub async fn count(qbo: &QuickbooksOnline, kind: ResourceKind) -> Result<u64> {
    match kind {
        ResourceKind::Accounts => qbo.accounts().count().await,
        ResourceKind::Departments => qbo.departments().count().await,
        ResourceKind::Classes => qbo.classes().count().await,
        ResourceKind::Employees => qbo.employees().count().await,
    }
}

async fn list_in<E: Entity>(resource: &Resource<E>, page: Option<Page>) -> Result<Vec<Value>> {
    match page {
        Some(page) => resource.get_page(page.start, page.max).await,
        None => resource.get_all().await,
    }
}
