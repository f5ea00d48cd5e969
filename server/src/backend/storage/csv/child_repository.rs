use anyhow::Result;
use async_trait::async_trait;
use log::{info, warn};
use std::path::PathBuf;

use super::connection::CsvConnection;
use crate::backend::domain::models::child::Child as DomainChild;
use crate::backend::io::rest::mappers::child_mapper::ChildMapper;
use crate::backend::storage::traits::ChildStorage;
use shared::Child as SharedChild;

/// Child profiles as one YAML file per child
#[derive(Clone)]
pub struct ChildRepository {
    connection: CsvConnection,
}

impl ChildRepository {
    pub fn new(connection: CsvConnection) -> Self {
        Self { connection }
    }

    fn child_path(&self, child_id: &str) -> PathBuf {
        CsvConnection::record_path(&self.connection.children_directory(), child_id)
    }
}

#[async_trait]
impl ChildStorage for ChildRepository {
    async fn store_child(&self, child: &DomainChild) -> Result<()> {
        let dto = ChildMapper::to_dto(child.clone());
        CsvConnection::write_yaml(&self.child_path(&child.id), &dto)?;
        info!("Saved child {} ({})", child.name, child.id);
        Ok(())
    }

    async fn get_child(&self, child_id: &str) -> Result<Option<DomainChild>> {
        let dto: Option<SharedChild> = CsvConnection::read_yaml(&self.child_path(child_id))?;
        match dto {
            // The file name is derived from the id, so compare the stored id too
            Some(dto) if dto.id == child_id => Ok(Some(ChildMapper::to_domain(dto)?)),
            _ => Ok(None),
        }
    }

    async fn list_children(&self) -> Result<Vec<DomainChild>> {
        let dtos: Vec<SharedChild> =
            CsvConnection::read_yaml_directory(&self.connection.children_directory())?;

        let mut children: Vec<DomainChild> = dtos
            .into_iter()
            .filter_map(|dto| {
                let id = dto.id.clone();
                ChildMapper::to_domain(dto)
                    .map_err(|e| warn!("Skipping child {}: {:#}", id, e))
                    .ok()
            })
            .collect();

        children.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(children)
    }

    async fn delete_child(&self, child_id: &str) -> Result<bool> {
        if self.get_child(child_id).await?.is_none() {
            return Ok(false);
        }
        let removed = CsvConnection::remove_file(&self.child_path(child_id))?;
        if removed {
            info!("Deleted child {}", child_id);
        }
        Ok(removed)
    }
}
