//! Value/aim relationship graph.
//!
//! Owns the node-plus-edge aggregate. Edges are only written while creating
//! a node and only removed while deleting one of their endpoints, and both
//! of those sequences run inside a single transaction so no other reader can
//! observe a half-created or half-deleted node.
//!
//! Acyclicity holds by construction: a new node has no children, so edges
//! from it to existing parents cannot close a loop. Parent ids are checked
//! for existence (and share-locked) inside the creating transaction.

use sqlx::PgPool;
use tracing::{debug, info};

use pds_db::StoreError;
use pds_db::models::{Aim, AimSummary};
use pds_db::queries::aims;

use crate::error::{ServiceError, ServiceResult, require};

/// Direction of a one-hop graph query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
    Children,
    Parents,
}

impl Relation {
    pub fn label(self) -> &'static str {
        match self {
            Self::Children => "Children",
            Self::Parents => "Parents",
        }
    }
}

/// A node together with its one-hop neighbours in one direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Related {
    pub relation: Relation,
    pub node: Aim,
    pub nodes: Vec<Aim>,
    /// Every transitive parent of `node`, shown as its breadcrumb trail.
    pub ancestors: Vec<Aim>,
}

/// Graph operations over a borrowed store handle.
#[derive(Debug, Clone, Copy)]
pub struct ValueGraph<'a> {
    pool: &'a PgPool,
}

impl<'a> ValueGraph<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Every node, in id order.
    pub async fn list_all(&self) -> ServiceResult<Vec<Aim>> {
        Ok(aims::list_aims(self.pool).await?)
    }

    /// Every node with its parents' names, for the values listing.
    pub async fn summaries(&self) -> ServiceResult<Vec<AimSummary>> {
        Ok(aims::list_aim_summaries(self.pool).await?)
    }

    /// One node with its parents' names.
    pub async fn summary(&self, id: i64) -> ServiceResult<AimSummary> {
        let node = aims::get_aim(self.pool, id).await?;
        let parents = aims::parents_of(self.pool, id).await?;
        Ok(summarize(node, &parents))
    }

    pub async fn get(&self, id: i64) -> ServiceResult<Aim> {
        Ok(aims::get_aim(self.pool, id).await?)
    }

    /// Nodes recorded as children of `id`. Empty for an unknown id.
    pub async fn children(&self, id: i64) -> ServiceResult<Vec<Aim>> {
        Ok(aims::children_of(self.pool, id).await?)
    }

    /// Nodes recorded as parents of `id`. Empty for an unknown id.
    pub async fn parents(&self, id: i64) -> ServiceResult<Vec<Aim>> {
        Ok(aims::parents_of(self.pool, id).await?)
    }

    /// Transitive parents of `id`.
    pub async fn ancestors(&self, id: i64) -> ServiceResult<Vec<Aim>> {
        Ok(aims::ancestors_of(self.pool, id).await?)
    }

    /// The node `id` and its neighbours; `NotFound` if the node is absent.
    pub async fn related(&self, id: i64, relation: Relation) -> ServiceResult<Related> {
        let node = self.get(id).await?;
        let nodes = match relation {
            Relation::Children => self.children(id).await?,
            Relation::Parents => self.parents(id).await?,
        };
        let ancestors = self.ancestors(id).await?;
        debug!(
            aim_id = id,
            ?relation,
            count = nodes.len(),
            ancestors = ancestors.len(),
            "loaded related values"
        );
        Ok(Related {
            relation,
            node,
            nodes,
            ancestors,
        })
    }

    /// Insert a node and one edge per distinct parent id, atomically.
    ///
    /// Fails with [`ServiceError::Validation`] when the name is blank or any
    /// parent does not exist; nothing is written in that case.
    pub async fn create(
        &self,
        name: &str,
        description: Option<&str>,
        parent_ids: &[i64],
    ) -> ServiceResult<Aim> {
        require("name", name)?;
        let description = description.map(str::trim).filter(|d| !d.is_empty());

        let mut parents = parent_ids.to_vec();
        parents.sort_unstable();
        parents.dedup();

        let mut tx = self.pool.begin().await.map_err(StoreError::from)?;

        if !parents.is_empty() {
            let found = aims::lock_existing_ids(&mut *tx, &parents).await?;
            if found.len() != parents.len() {
                let missing: Vec<String> = parents
                    .iter()
                    .filter(|id| !found.contains(*id))
                    .map(i64::to_string)
                    .collect();
                return Err(ServiceError::validation(format!(
                    "unknown parent value: {}",
                    missing.join(", ")
                )));
            }
        }

        let aim = aims::insert_aim(&mut *tx, name.trim(), description).await?;
        for parent_id in &parents {
            aims::insert_edge(&mut *tx, aim.id, *parent_id).await?;
        }

        tx.commit().await.map_err(StoreError::from)?;

        info!(aim_id = aim.id, name = %aim.name, parents = ?parents, "value created");
        Ok(aim)
    }

    /// Remove a node and every edge touching it, atomically.
    ///
    /// Returns `NotFound` (and writes nothing) when the node does not exist,
    /// including when a concurrent delete of the same node committed first.
    pub async fn delete(&self, id: i64) -> ServiceResult<()> {
        let mut tx = self.pool.begin().await.map_err(StoreError::from)?;

        aims::lock_aim(&mut *tx, id).await?;
        let edges = aims::delete_edges_touching(&mut *tx, id).await?;
        aims::delete_aim(&mut *tx, id).await?;

        tx.commit().await.map_err(StoreError::from)?;

        info!(aim_id = id, edges, "value deleted");
        Ok(())
    }
}

/// Build the listing view of a node from its parents.
pub fn summarize(node: Aim, parents: &[Aim]) -> AimSummary {
    let parent_names = parents
        .iter()
        .map(|p| p.name.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    AimSummary {
        id: node.id,
        name: node.name,
        description: node.description,
        parent_names,
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn aim(id: i64, name: &str) -> Aim {
        Aim {
            id,
            name: name.to_owned(),
            description: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn summarize_joins_parent_names() {
        let summary = summarize(aim(3, "Cook"), &[aim(1, "Health"), aim(2, "Family")]);
        assert_eq!(summary.id, 3);
        assert_eq!(summary.parent_names, "Health, Family");
    }

    #[test]
    fn summarize_root_has_no_parents() {
        let summary = summarize(aim(1, "Health"), &[]);
        assert_eq!(summary.parent_names, "");
    }
}
