//! buildstamp library root.
//! Clean Architecture 계층을 외부에 노출한다.

use anyhow::Result;

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod interface;

use interface::cli::CliAction;
use interface::composition::AppComposition;

/// 파싱된 CLI 액션을 해당 유스케이스로 전달한다.
pub async fn run(action: CliAction) -> Result<()> {
    let composition = AppComposition::default();

    match action {
        CliAction::Create(options) => composition.create_usecase().execute(options).await,
        CliAction::CreateMetadata(options) => {
            composition.create_metadata_usecase().execute(options).await
        }
        CliAction::CreateTimestamp(options) => {
            composition.create_timestamp_usecase().execute(options)
        }
        CliAction::HgChangeset(options) => {
            composition.hg_changeset_usecase().execute(options).await
        }
    }
}
