use crate::backend::BeneficioBackend;
use crate::render;
use crate::routes::Route;
use crate::views::{
    Alerts, BeneficioFormView, BeneficioListView, DeleteOutcome, SaveOutcome, TransferOutcome,
    TransferenciaView,
};
use beneficios_core::{BeneficioId, ClientConfig, Valor};
use clap::{Parser, Subcommand};
use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Parser)]
#[command(name = "beneficios", version, about = "Gestão de benefícios")]
pub struct Cli {
    /// Backend base URL [default: http://localhost:8080].
    #[arg(long, global = true, env = "BENEFICIOS_API_URL")]
    pub api_url: Option<String>,

    /// Request timeout in seconds [default: 30].
    #[arg(long, global = true, env = "BENEFICIOS_HTTP_TIMEOUT_SECS")]
    pub timeout_secs: Option<u64>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Client settings from flags or their env vars, else the defaults.
    /// Not validated yet; [`crate::BeneficiosClient::from_config`] does that.
    pub fn client_config(&self) -> ClientConfig {
        let mut cfg = ClientConfig::default();
        if let Some(url) = &self.api_url {
            cfg.api_url = url.trim().to_string();
        }
        if let Some(secs) = self.timeout_secs {
            cfg.timeout = Duration::from_secs(secs);
        }
        cfg
    }
}

#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// List benefits, optionally filtered by name (default if no subcommand given).
    Listar {
        #[arg(long)]
        nome: Option<String>,

        /// Print the records as JSON instead of a table.
        #[arg(long)]
        json: bool,
    },

    /// Create a benefit.
    Novo {
        #[arg(long)]
        nome: String,

        /// Amount, e.g. `150.00` or `150,00`.
        #[arg(long)]
        valor: Valor,

        #[arg(long)]
        descricao: Option<String>,
    },

    /// Edit a benefit; omitted fields keep their current value.
    Editar {
        id: BeneficioId,

        #[arg(long)]
        nome: Option<String>,

        #[arg(long)]
        valor: Option<Valor>,

        #[arg(long)]
        descricao: Option<String>,

        #[arg(long)]
        ativo: Option<bool>,
    },

    /// Delete a benefit after confirmation.
    Excluir {
        id: BeneficioId,

        /// Skip the confirmation prompt.
        #[arg(long, short)]
        yes: bool,
    },

    /// Transfer an amount between two benefits.
    Transferir {
        #[arg(long)]
        de: BeneficioId,

        #[arg(long)]
        para: BeneficioId,

        #[arg(long)]
        valor: Valor,

        /// Show the balance preview without submitting.
        #[arg(long)]
        dry_run: bool,
    },

    /// Open a screen by path, e.g. `/beneficios/editar/3`.
    Abrir { rota: String },
}

impl Default for Commands {
    fn default() -> Self {
        Commands::Listar {
            nome: None,
            json: false,
        }
    }
}

impl Commands {
    pub fn assume_yes(&self) -> bool {
        matches!(self, Commands::Excluir { yes: true, .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandStatus {
    Ok,
    Failed,
}

/// Runs one command against `backend`, writing screens to `out`.
#[tracing::instrument(level = "debug", skip(backend, alerts, out))]
pub async fn run(
    command: Commands,
    backend: Arc<dyn BeneficioBackend>,
    alerts: Arc<dyn Alerts>,
    out: &mut dyn Write,
) -> std::io::Result<CommandStatus> {
    let shell = Shell {
        backend,
        alerts,
        out,
    };
    shell.dispatch(command).await
}

struct Shell<'a> {
    backend: Arc<dyn BeneficioBackend>,
    alerts: Arc<dyn Alerts>,
    out: &'a mut dyn Write,
}

impl Shell<'_> {
    async fn dispatch(mut self, command: Commands) -> std::io::Result<CommandStatus> {
        match command {
            Commands::Listar { nome, json } => self.list(nome.as_deref(), json).await,
            Commands::Novo {
                nome,
                valor,
                descricao,
            } => {
                let mut view = BeneficioFormView::new_form(self.backend.clone(), self.alerts.clone());
                view.set_nome(nome);
                view.set_valor(Some(valor));
                if let Some(descricao) = descricao {
                    view.set_descricao(descricao);
                }
                self.save(view).await
            }
            Commands::Editar {
                id,
                nome,
                valor,
                descricao,
                ativo,
            } => {
                let mut view = match BeneficioFormView::open_edit(
                    self.backend.clone(),
                    self.alerts.clone(),
                    id,
                )
                .await
                {
                    Ok(view) => view,
                    Err(redirect) => {
                        self.navigate(redirect.to).await?;
                        return Ok(CommandStatus::Failed);
                    }
                };
                if let Some(nome) = nome {
                    view.set_nome(nome);
                }
                if let Some(valor) = valor {
                    view.set_valor(Some(valor));
                }
                if let Some(descricao) = descricao {
                    view.set_descricao(descricao);
                }
                if let Some(ativo) = ativo {
                    view.set_ativo(ativo);
                }
                self.save(view).await
            }
            Commands::Excluir { id, .. } => {
                let mut view = BeneficioListView::new(self.backend.clone(), self.alerts.clone());
                match view.delete(id).await {
                    DeleteOutcome::Cancelled => Ok(CommandStatus::Ok),
                    DeleteOutcome::Deleted { reloaded: true } => {
                        write!(self.out, "{}", render::beneficio_table(view.beneficios()))?;
                        Ok(CommandStatus::Ok)
                    }
                    DeleteOutcome::Deleted { reloaded: false } | DeleteOutcome::Failed(_) => {
                        Ok(CommandStatus::Failed)
                    }
                }
            }
            Commands::Transferir {
                de,
                para,
                valor,
                dry_run,
            } => self.transfer(de, para, valor, dry_run).await,
            Commands::Abrir { rota } => self.open(Route::parse(&rota)).await,
        }
    }

    async fn list(&mut self, nome: Option<&str>, json: bool) -> std::io::Result<CommandStatus> {
        let mut view = BeneficioListView::new(self.backend.clone(), self.alerts.clone());
        let loaded = match nome {
            Some(filtro) => view.search(filtro).await,
            None => view.load().await,
        };
        if loaded.is_err() {
            return Ok(CommandStatus::Failed);
        }
        if json {
            serde_json::to_writer_pretty(&mut *self.out, view.beneficios())?;
            writeln!(self.out)?;
        } else {
            write!(self.out, "{}", render::beneficio_table(view.beneficios()))?;
        }
        Ok(CommandStatus::Ok)
    }

    async fn save(&mut self, mut view: BeneficioFormView) -> std::io::Result<CommandStatus> {
        match view.save().await {
            SaveOutcome::Saved { next, .. } => self.navigate(next).await,
            SaveOutcome::Invalid(errors) => {
                write!(self.out, "{}", render::validation_errors(&errors))?;
                Ok(CommandStatus::Failed)
            }
            SaveOutcome::Busy | SaveOutcome::Failed(_) => Ok(CommandStatus::Failed),
        }
    }

    async fn transfer(
        &mut self,
        de: BeneficioId,
        para: BeneficioId,
        valor: Valor,
        dry_run: bool,
    ) -> std::io::Result<CommandStatus> {
        let mut view = TransferenciaView::new(self.backend.clone(), self.alerts.clone());
        if view.load().await.is_err() {
            return Ok(CommandStatus::Failed);
        }
        view.set_origem(Some(de));
        view.set_destino(Some(para));
        view.set_valor(Some(valor));
        write!(self.out, "{}", render::transfer_panel(&view.preview()))?;

        if !view.can_submit() {
            write!(self.out, "{}", render::validation_errors(&view.draft().errors()))?;
            return Ok(CommandStatus::Failed);
        }
        if dry_run {
            return Ok(CommandStatus::Ok);
        }

        match view.submit().await {
            TransferOutcome::Done { reloaded: true, .. } => {
                write!(self.out, "{}", render::beneficio_table(view.beneficios()))?;
                Ok(CommandStatus::Ok)
            }
            TransferOutcome::Done { reloaded: false, .. } => Ok(CommandStatus::Failed),
            TransferOutcome::Invalid(errors) => {
                write!(self.out, "{}", render::validation_errors(&errors))?;
                Ok(CommandStatus::Failed)
            }
            TransferOutcome::Busy | TransferOutcome::Failed(_) => Ok(CommandStatus::Failed),
        }
    }

    /// Shows a screen without acting on it.
    async fn open(&mut self, route: Route) -> std::io::Result<CommandStatus> {
        match route {
            Route::List => self.list(None, false).await,
            Route::New => {
                let view = BeneficioFormView::new_form(self.backend.clone(), self.alerts.clone());
                write!(
                    self.out,
                    "{}",
                    render::form_summary(view.title(), view.draft(), false)
                )?;
                Ok(CommandStatus::Ok)
            }
            Route::Edit(id) => {
                match BeneficioFormView::open_edit(self.backend.clone(), self.alerts.clone(), id)
                    .await
                {
                    Ok(view) => {
                        write!(
                            self.out,
                            "{}",
                            render::form_summary(view.title(), view.draft(), true)
                        )?;
                        Ok(CommandStatus::Ok)
                    }
                    Err(redirect) => {
                        self.navigate(redirect.to).await?;
                        Ok(CommandStatus::Failed)
                    }
                }
            }
            Route::Transfer => {
                let mut view = TransferenciaView::new(self.backend.clone(), self.alerts.clone());
                if view.load().await.is_err() {
                    return Ok(CommandStatus::Failed);
                }
                write!(self.out, "{}", render::option_list(view.beneficios()))?;
                Ok(CommandStatus::Ok)
            }
        }
    }

    /// Follows a screen's navigation request. Only the list is a target today.
    async fn navigate(&mut self, route: Route) -> std::io::Result<CommandStatus> {
        tracing::debug!(%route, "navigating");
        if route == Route::List {
            return self.list(None, false).await;
        }
        Ok(CommandStatus::Ok)
    }
}
