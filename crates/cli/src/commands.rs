use crate::config::load_layout;
use crate::flags::{CategoryFlag, DocumentFlag, GenderFlag};
use crate::render::{catalog_text, roster_text, RosterListing};
use crate::{pdf, print_stdout};
use anyhow::{anyhow, bail, Context as AnyhowContext, Result};
use clap::Args;
use dialoguer::Confirm;
use romaneio_protocol::{Category, PersonnelRecord};
use romaneio_report::{
    aggregate, detailed_document, detailed_text, screen_report, summary_document, ReportError,
    ReportKind, EMPTY_REPORT_MESSAGE,
};
use romaneio_roster::{filter, RosterService, RosterStatus};
use romaneio_store::RecordStore;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct ListArgs {
    /// Search text (service number, rank or war name). Empty shows the last two records
    query: Option<String>,

    /// Emit JSON instead of text
    #[arg(long)]
    json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct AddArgs {
    /// Rank (posto/graduação)
    #[arg(long)]
    rank: String,

    /// Six-digit service number (RE)
    #[arg(long = "re")]
    service_number: String,

    /// War name
    #[arg(long)]
    name: String,

    /// Organizational unit (OPM); defaults to the form default
    #[arg(long)]
    unit: Option<String>,

    #[arg(long, value_enum)]
    gender: Option<GenderFlag>,
}

#[derive(Args, Debug)]
pub(crate) struct EditArgs {
    /// Service number of the record to edit
    re: String,

    #[arg(long)]
    rank: Option<String>,

    /// New service number
    #[arg(long = "new-re")]
    new_service_number: Option<String>,

    #[arg(long)]
    name: Option<String>,

    #[arg(long)]
    unit: Option<String>,

    #[arg(long, value_enum)]
    gender: Option<GenderFlag>,

    /// Clear the recorded gender
    #[arg(long, conflicts_with = "gender")]
    no_gender: bool,
}

#[derive(Args, Debug)]
pub(crate) struct SizingArgs {
    /// Service number of the record
    re: String,

    #[arg(long)]
    shirt: Option<String>,
    #[arg(long)]
    pants: Option<String>,
    #[arg(long)]
    tshirt: Option<String>,
    #[arg(long)]
    jacket: Option<String>,
    #[arg(long)]
    boots: Option<String>,
    #[arg(long)]
    beret: Option<String>,
    #[arg(long)]
    insignia: Option<String>,
    #[arg(long)]
    belt: Option<String>,
}

impl SizingArgs {
    fn given(&self) -> [(Category, Option<&String>); 8] {
        [
            (Category::Shirt, self.shirt.as_ref()),
            (Category::Pants, self.pants.as_ref()),
            (Category::TShirt, self.tshirt.as_ref()),
            (Category::Jacket, self.jacket.as_ref()),
            (Category::Boots, self.boots.as_ref()),
            (Category::Beret, self.beret.as_ref()),
            (Category::BeretInsignia, self.insignia.as_ref()),
            (Category::Belt, self.belt.as_ref()),
        ]
    }
}

#[derive(Args, Debug)]
pub(crate) struct DeleteArgs {
    /// Service number of the record to delete
    re: String,

    /// Skip the confirmation prompt
    #[arg(long, short)]
    yes: bool,
}

#[derive(Args, Debug)]
pub(crate) struct ReportArgs {
    /// Per-person report instead of the aggregated one
    #[arg(long)]
    detailed: bool,

    /// Restrict the detailed report to records matching this search
    #[arg(long, requires = "detailed")]
    query: Option<String>,

    /// Emit the aggregated report as JSON
    #[arg(long, conflicts_with = "detailed")]
    json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct PdfArgs {
    #[arg(value_enum)]
    kind: DocumentFlag,

    /// Output file (defaults to the standard artifact name)
    #[arg(long)]
    out: Option<PathBuf>,

    /// JSON page layout override
    #[arg(long)]
    layout: Option<PathBuf>,

    /// Restrict the detailed document to records matching this search
    #[arg(long)]
    query: Option<String>,
}

#[derive(Args, Debug)]
pub(crate) struct SizesArgs {
    #[arg(value_enum)]
    category: Option<CategoryFlag>,
}

fn ensure_readable<S: RecordStore>(service: &RosterService<S>) -> Result<()> {
    if let RosterStatus::Failed(message) = service.roster().status() {
        bail!("Erro ao carregar dados: {message}");
    }
    Ok(())
}

fn lookup<S: RecordStore>(service: &RosterService<S>, re: &str) -> Result<PersonnelRecord> {
    service
        .roster()
        .find_by_service_number(re.trim())
        .cloned()
        .ok_or_else(|| anyhow!("Nenhum militar com RE {}", re.trim()))
}

/// Records a detailed report covers: the whole roster, or the search result.
fn report_records<S: RecordStore>(
    service: &RosterService<S>,
    query: Option<&str>,
) -> Vec<PersonnelRecord> {
    let roster = service.roster();
    match query {
        Some(query) => filter(query, roster.records()),
        None => roster.records().to_vec(),
    }
}

pub(crate) fn run_list<S: RecordStore>(service: &RosterService<S>, args: ListArgs) -> Result<()> {
    let view = service.view(args.query.as_deref().unwrap_or_default());
    if args.json {
        let listing = RosterListing::new(&view);
        return print_stdout(&serde_json::to_string_pretty(&listing)?);
    }
    print_stdout(&roster_text(&view))
}

pub(crate) async fn run_add<S: RecordStore>(
    service: &mut RosterService<S>,
    args: AddArgs,
) -> Result<()> {
    ensure_readable(service)?;
    let re = args.service_number.trim().to_string();
    let fields = &mut service.form_mut().fields;
    fields.rank = args.rank;
    fields.service_number = args.service_number;
    fields.war_name = args.name;
    if let Some(unit) = args.unit {
        fields.unit = unit;
    }
    fields.gender = args.gender.map(|g| g.as_domain().label().to_string());

    let outcome = service.submit().await.context("Erro ao salvar")?;
    log::debug!("Add outcome: {outcome:?}");
    print_stdout(&format!("Militar cadastrado: RE {re}"))
}

pub(crate) async fn run_edit<S: RecordStore>(
    service: &mut RosterService<S>,
    args: EditArgs,
) -> Result<()> {
    ensure_readable(service)?;
    let record = lookup(service, &args.re)?;
    service.begin_edit(&record.id)?;
    let fields = &mut service.form_mut().fields;
    if let Some(rank) = args.rank {
        fields.rank = rank;
    }
    if let Some(service_number) = args.new_service_number {
        fields.service_number = service_number;
    }
    if let Some(name) = args.name {
        fields.war_name = name;
    }
    if let Some(unit) = args.unit {
        fields.unit = unit;
    }
    if let Some(gender) = args.gender {
        fields.gender = Some(gender.as_domain().label().to_string());
    } else if args.no_gender {
        fields.gender = None;
    }

    let outcome = service.submit().await.context("Erro ao atualizar")?;
    log::debug!("Edit outcome: {outcome:?}");
    print_stdout(&format!("Militar atualizado: RE {}", args.re.trim()))
}

pub(crate) async fn run_sizing<S: RecordStore>(
    service: &RosterService<S>,
    args: SizingArgs,
) -> Result<()> {
    ensure_readable(service)?;
    let record = lookup(service, &args.re)?;
    let mut sizing = record.sizing.clone().unwrap_or_default();
    for (category, value) in args.given() {
        if let Some(value) = value {
            sizing.set(category, value.trim());
        }
    }
    service
        .save_sizing(&record.id, sizing)
        .await
        .context("Erro ao salvar romaneio")?;
    print_stdout(&format!("Romaneio salvo: {}", record.display_name()))
}

pub(crate) async fn run_delete<S: RecordStore>(
    service: &mut RosterService<S>,
    args: DeleteArgs,
) -> Result<()> {
    ensure_readable(service)?;
    let record = lookup(service, &args.re)?;
    if !args.yes {
        let confirmed = Confirm::new()
            .with_prompt(format!(
                "Tem certeza que deseja excluir o militar RE {} ?",
                record.service_number
            ))
            .default(false)
            .interact()
            .context("Failed to read confirmation (use --yes when not on a terminal)")?;
        if !confirmed {
            log::info!("Delete of RE {} cancelled", record.service_number);
            return Ok(());
        }
    }
    service
        .delete(&record.id)
        .await
        .context("Erro ao excluir")?;
    print_stdout(&format!("Militar excluído: RE {}", record.service_number))
}

/// Prints the empty-report message for the soft error; passes anything else on.
fn soft_empty<T>(result: romaneio_report::Result<T>) -> Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(ReportError::NoSizingRecords) => {
            print_stdout(EMPTY_REPORT_MESSAGE)?;
            Ok(None)
        }
        Err(err) => Err(err.into()),
    }
}

pub(crate) fn run_report<S: RecordStore>(
    service: &RosterService<S>,
    args: ReportArgs,
) -> Result<()> {
    ensure_readable(service)?;
    if args.detailed {
        let records = report_records(service, args.query.as_deref());
        if let Some(text) = soft_empty(detailed_text(&records))? {
            print_stdout(text.trim_end())?;
        }
        return Ok(());
    }

    let totals = aggregate(service.roster().records());
    let Some(report) = soft_empty(screen_report(&totals))? else {
        return Ok(());
    };
    if args.json {
        print_stdout(&serde_json::to_string_pretty(&report)?)
    } else {
        print_stdout(report.to_string().trim_end())
    }
}

pub(crate) fn run_pdf<S: RecordStore>(service: &RosterService<S>, args: PdfArgs) -> Result<()> {
    ensure_readable(service)?;
    let layout = load_layout(args.layout.as_deref())?;
    let kind = args.kind.as_domain();
    let document = match kind {
        ReportKind::Summary => {
            if args.query.is_some() {
                log::warn!("--query only applies to the detailed document; ignored");
            }
            summary_document(&aggregate(service.roster().records()), &layout)
        }
        ReportKind::Detailed => {
            detailed_document(&report_records(service, args.query.as_deref()), &layout)
        }
    };
    let Some(document) = soft_empty(document)? else {
        return Ok(());
    };
    let out = args
        .out
        .unwrap_or_else(|| PathBuf::from(document.file_name()));
    pdf::write(&document, &layout, &out)?;
    print_stdout(&out.display().to_string())
}

pub(crate) fn run_sizes(args: SizesArgs) -> Result<()> {
    let categories: Vec<Category> = match args.category {
        Some(flag) => vec![flag.as_domain()],
        None => Category::ALL.to_vec(),
    };
    print_stdout(&catalog_text(&categories))
}
