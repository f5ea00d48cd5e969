//! The active child session.
//!
//! One child at a time is "active" and used as the default for story
//! generation. The stored id can go stale when a child is deleted; reading a
//! stale selection clears it and reports no active child instead of failing.

use anyhow::Result;
use log::{info, warn};
use std::sync::Arc;

use super::models::child::Child;
use crate::backend::storage::{ActiveChildStorage, ChildStorage};

#[derive(Clone)]
pub struct ActiveChildService {
    session: Arc<dyn ActiveChildStorage>,
    child_repository: Arc<dyn ChildStorage>,
    /// Verify a child before storing the selection
    eager: bool,
}

impl ActiveChildService {
    pub fn new(
        session: Arc<dyn ActiveChildStorage>,
        child_repository: Arc<dyn ChildStorage>,
        eager: bool,
    ) -> Self {
        Self {
            session,
            child_repository,
            eager,
        }
    }

    /// Resolves the stored selection, clearing it when the child is gone
    pub async fn active_child(&self) -> Result<Option<Child>> {
        let Some(child_id) = self.session.get_active_child_id().await? else {
            return Ok(None);
        };

        match self.child_repository.get_child(&child_id).await? {
            Some(child) => Ok(Some(child)),
            None => {
                warn!("Active child {} no longer exists; clearing selection", child_id);
                self.session.clear_active_child().await?;
                Ok(None)
            }
        }
    }

    /// Selects a child. An unknown id leaves no child active.
    pub async fn select(&self, child_id: &str) -> Result<Option<Child>> {
        info!("Selecting active child: {}", child_id);

        if self.eager {
            match self.child_repository.get_child(child_id).await? {
                Some(child) => {
                    self.session.set_active_child_id(&child.id).await?;
                    Ok(Some(child))
                }
                None => {
                    warn!("Cannot select unknown child {}", child_id);
                    self.session.clear_active_child().await?;
                    Ok(None)
                }
            }
        } else {
            self.session.set_active_child_id(child_id).await?;
            self.active_child().await
        }
    }

    pub async fn clear(&self) -> Result<()> {
        info!("Clearing active child");
        self.session.clear_active_child().await
    }
}
