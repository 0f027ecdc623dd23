//! CLI 명령 파싱 모듈.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::options::{
    ChangesetOptions, CreateOptions, MetadataOptions, ScmConnection, TimestampOptions,
};

#[derive(Debug, Parser)]
#[command(name = "buildstamp")]
#[command(about = "Stamp SCM revision, branch, and timestamp into build property files")]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Create a build number from the SCM revision or a format template
    Create(CreateArgs),
    /// Collect name/version/revision/timestamp metadata into output files
    CreateMetadata(CreateMetadataArgs),
    /// Record a timestamp only
    CreateTimestamp(CreateTimestampArgs),
    /// Record the Mercurial changeset id and date
    HgChangeset(HgChangesetArgs),
}

/// SCM 접속 공통 플래그.
#[derive(Debug, Args)]
struct ScmArgs {
    /// SCM connection URL, e.g. scm:git:https://host/repo.git
    #[arg(long)]
    scm_url: Option<String>,

    /// Working copy directory for SCM commands
    #[arg(long, default_value = ".")]
    directory: PathBuf,

    /// Username for the SCM system (svn)
    #[arg(long)]
    username: Option<String>,

    /// Password for the SCM system (svn)
    #[arg(long)]
    password: Option<String>,

    /// Downgrade SCM failures to a warning and use this revision instead
    #[arg(long)]
    revision_on_failure: Option<String>,

    /// Abbreviate the revision to this length (git only, minimum 4)
    #[arg(long, default_value_t = 0)]
    short_revision: u32,

    /// Use the last committed revision instead of the repository revision
    #[arg(long)]
    use_last_committed: bool,
}

impl ScmArgs {
    fn into_connection(self) -> ScmConnection {
        ScmConnection {
            url: self.scm_url,
            directory: self.directory,
            username: self.username,
            password: self.password,
            revision_on_failure: self.revision_on_failure,
            short_revision_length: self.short_revision,
            use_last_committed: self.use_last_committed,
        }
    }
}

#[derive(Debug, Args)]
struct CreateArgs {
    #[command(flatten)]
    scm: ScmArgs,

    /// Fail when the working copy has local modifications
    #[arg(long)]
    check: bool,

    /// Update the working copy before reading the revision
    #[arg(long)]
    update: bool,

    /// Skip the working copy update even when --update is set
    #[arg(long)]
    offline: bool,

    /// Message template with {timestamp}, {scmVersion}, {buildNumberN} tokens
    #[arg(long)]
    format: Option<String>,

    /// Counter file backing the buildNumberN tokens
    #[arg(long, default_value = "buildNumber.properties")]
    sequence_file: PathBuf,

    /// strftime pattern for the timestamp (default: epoch millis)
    #[arg(long)]
    timestamp_format: Option<String>,

    /// Property name for the build number
    #[arg(long, default_value = "buildNumber")]
    build_number_property: String,

    /// Property name for the timestamp
    #[arg(long, default_value = "timestamp")]
    timestamp_property: String,

    /// Property name for the SCM branch
    #[arg(long, default_value = "scmBranch")]
    branch_property: String,

    /// Output file for the stamped properties
    #[arg(long, default_value = "buildstamp.properties")]
    output: PathBuf,
}

#[derive(Debug, Args)]
struct CreateMetadataArgs {
    #[command(flatten)]
    scm: ScmArgs,

    /// Application name to record
    #[arg(long)]
    name: String,

    /// Application version to record
    #[arg(long)]
    version: String,

    /// Property name for the application name
    #[arg(long, default_value = "name")]
    name_property: String,

    /// Property name for the version
    #[arg(long, default_value = "version")]
    version_property: String,

    /// Property name for the revision
    #[arg(long, default_value = "revision")]
    revision_property: String,

    /// Property name for the timestamp
    #[arg(long, default_value = "timestamp")]
    timestamp_property: String,

    /// strftime pattern for the timestamp (default: epoch millis)
    #[arg(long)]
    timestamp_format: Option<String>,

    /// Timezone for the timestamp: UTC or a +HH:MM offset
    #[arg(long)]
    timezone: Option<String>,

    /// Directory for the primary output file
    #[arg(long, default_value = "generated/build-metadata")]
    output_directory: PathBuf,

    /// Name of the primary output file
    #[arg(long, default_value = "build.properties")]
    output_name: String,

    /// Additional output files (repeatable)
    #[arg(long = "output-file")]
    output_files: Vec<PathBuf>,

    /// Additional key=value property to record (repeatable)
    #[arg(long = "property", value_parser = parse_key_value)]
    properties: Vec<(String, String)>,

    /// Pick the serialization from the file extension (.properties/.json)
    #[arg(long)]
    auto_detect_format: bool,
}

#[derive(Debug, Args)]
struct CreateTimestampArgs {
    /// Property name for the timestamp
    #[arg(long, default_value = "timestamp")]
    timestamp_property: String,

    /// strftime pattern for the timestamp (default: epoch millis)
    #[arg(long)]
    timestamp_format: Option<String>,

    /// Optional output file; omit to print only
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Debug, Args)]
struct HgChangesetArgs {
    /// Working copy directory for hg commands
    #[arg(long, default_value = ".")]
    directory: PathBuf,

    /// Property name for the changeset id
    #[arg(long, default_value = "changeSet")]
    changeset_property: String,

    /// Property name for the changeset date
    #[arg(long, default_value = "changeSetDate")]
    changeset_date_property: String,

    /// Optional output file; omit to print only
    #[arg(long)]
    output: Option<PathBuf>,
}

pub enum CliAction {
    Create(CreateOptions),
    CreateMetadata(MetadataOptions),
    CreateTimestamp(TimestampOptions),
    HgChangeset(ChangesetOptions),
}

impl Cli {
    pub fn parse_action() -> CliAction {
        let cli = Cli::parse();

        match cli.command {
            Commands::Create(args) => CliAction::Create(CreateOptions {
                scm: args.scm.into_connection(),
                check: args.check,
                update: args.update,
                offline: args.offline,
                format: args.format,
                sequence_file: args.sequence_file,
                timestamp_format: args.timestamp_format,
                build_number_property: args.build_number_property,
                timestamp_property: args.timestamp_property,
                branch_property: args.branch_property,
                output: args.output,
            }),
            Commands::CreateMetadata(args) => CliAction::CreateMetadata(MetadataOptions {
                scm: args.scm.into_connection(),
                application_name: args.name,
                application_property: args.name_property,
                version: args.version,
                version_property: args.version_property,
                revision_property: args.revision_property,
                timestamp_property: args.timestamp_property,
                timestamp_format: args.timestamp_format,
                timezone: args.timezone,
                output_directory: args.output_directory,
                output_name: args.output_name,
                output_files: args.output_files,
                properties: args.properties.into_iter().collect(),
                auto_detect_format: args.auto_detect_format,
            }),
            Commands::CreateTimestamp(args) => CliAction::CreateTimestamp(TimestampOptions {
                timestamp_property: args.timestamp_property,
                timestamp_format: args.timestamp_format,
                output: args.output,
            }),
            Commands::HgChangeset(args) => CliAction::HgChangeset(ChangesetOptions {
                directory: args.directory,
                changeset_property: args.changeset_property,
                changeset_date_property: args.changeset_date_property,
                output: args.output,
            }),
        }
    }
}

fn parse_key_value(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected key=value, got '{raw}'")),
    }
}
