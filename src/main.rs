use anyhow::Context;
use clap::Parser;
use eavfix::*;
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
enum Eavfix {
    #[command(
        name = "fix-discriminator",
        about = "Update the database ensuring each data row has the discriminator \
                 declared by the data class of its family in the model"
    )]
    FixDiscriminator {
        #[arg(long, help = "Model file declaring families and storage mappings")]
        model: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    log();
    match Eavfix::parse() {
        Eavfix::FixDiscriminator { model } => {
            let path = model
                .or_else(|| std::env::var_os("EAV_MODEL").map(PathBuf::from))
                .context("model file required: pass --model or set EAV_MODEL")?;
            let model = schema::Model::load(&path)?;
            log::info!("reconciling discriminators for {} families", model.families.len());
            let client = db::db().await?;
            let reconciler = fix::Reconciler::new(&model.families, &model, &client);
            let outcomes = reconciler.run().await?;
            log::info!("done, {} families processed", outcomes.len());
            Ok(())
        }
    }
}
