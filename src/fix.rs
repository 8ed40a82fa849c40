use crate::family::Family;
use crate::family::FamilyRegistry;
use crate::schema::Schema;
use anyhow::Context;
use colored::Colorize;
use std::sync::Arc;
use tokio_postgres::Client;

/// Build the discriminator repair statement for one family's table. The
/// `!= $1` guard makes the statement a no-op on rows already tagged
/// correctly, so the affected count reads as rows fixed and reruns are
/// idempotent.
pub fn update_sql(table: &str, discriminator: &str, family: &str) -> String {
    format!(
        "UPDATE \"{t}\" SET \"{d}\" = $1 WHERE \"{f}\" = $2 AND \"{d}\" != $1",
        t = table,
        d = discriminator,
        f = family,
    )
}

/// Execute defines the write interface between the reconciler and the
/// database: prepare the statement, bind the discriminator value and the
/// family code, run it, count affected rows.
#[async_trait::async_trait]
pub trait Execute: Send + Sync {
    async fn affected(&self, sql: &str, discriminator: &str, code: &str) -> anyhow::Result<u64>;
}

#[async_trait::async_trait]
impl Execute for Client {
    async fn affected(&self, sql: &str, discriminator: &str, code: &str) -> anyhow::Result<u64> {
        self.execute(sql, &[&discriminator, &code])
            .await
            .with_context(|| format!("statement failed: {}", sql))
    }
}

#[async_trait::async_trait]
impl Execute for Arc<Client> {
    async fn affected(&self, sql: &str, discriminator: &str, code: &str) -> anyhow::Result<u64> {
        self.as_ref().affected(sql, discriminator, code).await
    }
}

/// One reconciled family: its code and how many rows were rewritten.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub code: String,
    pub count: u64,
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.count {
            0 => write!(
                f,
                "{}",
                format!("No data to clean for family {}", self.code).green()
            ),
            n => write!(
                f,
                "{}",
                format!("{} data updated for family {}", n, self.code).yellow()
            ),
        }
    }
}

/// Walks the registry in order and rewrites drifted discriminator tags one
/// family at a time. Abstract families and non-polymorphic storage are
/// skipped without output; the first failure aborts the remaining families,
/// leaving earlier updates committed.
pub struct Reconciler<'a, E> {
    registry: &'a FamilyRegistry,
    schema: &'a dyn Schema,
    executor: &'a E,
}

impl<'a, E: Execute> Reconciler<'a, E> {
    pub fn new(registry: &'a FamilyRegistry, schema: &'a dyn Schema, executor: &'a E) -> Self {
        Self {
            registry,
            schema,
            executor,
        }
    }

    /// Run the full reconciliation, printing one status line per processed
    /// family as it completes. Returns the outcomes in registry order.
    pub async fn run(&self) -> anyhow::Result<Vec<Outcome>> {
        let mut outcomes = Vec::new();
        for family in self.registry.families() {
            match self.reconcile(family).await? {
                None => continue,
                Some(outcome) => {
                    println!("{}", outcome);
                    outcomes.push(outcome);
                }
            }
        }
        Ok(outcomes)
    }

    async fn reconcile(&self, family: &Family) -> anyhow::Result<Option<Outcome>> {
        if !family.instantiable {
            return Ok(None);
        }
        let mapping = self.schema.mapping(&family.data_class)?;
        let discriminator = match mapping.discriminator_column {
            None => return Ok(None),
            Some(ref column) => column,
        };
        let sql = update_sql(&mapping.table, discriminator, &mapping.family_column);
        let count = self
            .executor
            .affected(&sql, &mapping.discriminator_value, &family.code)
            .await?;
        Ok(Some(Outcome {
            code: family.code.clone(),
            count,
        }))
    }
}
