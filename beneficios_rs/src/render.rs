//! Plain-text rendering for the terminal.

use beneficios_core::{Beneficio, BeneficioDraft, TransferPreview, ValidationErrors, Valor};
use std::fmt::Write as _;
use unicode_width::UnicodeWidthStr;

pub const EMPTY_LIST: &str = "Nenhum benefício encontrado";
pub const SAME_TARGET_WARNING: &str = "Não é possível transferir para o mesmo benefício";

const TABLE_HEADER: [&str; 5] = ["ID", "Nome", "Descrição", "Valor", "Status"];

pub fn status_label(ativo: bool) -> &'static str {
    if ativo { "Ativo" } else { "Inativo" }
}

/// Columns are padded by display width so accented names line up.
pub fn beneficio_table(beneficios: &[Beneficio]) -> String {
    if beneficios.is_empty() {
        return format!("{EMPTY_LIST}\n");
    }

    let rows: Vec<[String; 5]> = beneficios
        .iter()
        .map(|b| {
            [
                b.id.map(|id| id.to_string()).unwrap_or_else(|| "-".into()),
                b.nome.clone(),
                b.descricao_or_none().unwrap_or("-").to_string(),
                b.valor.brl(),
                status_label(b.ativo).to_string(),
            ]
        })
        .collect();

    let mut widths = TABLE_HEADER.map(UnicodeWidthStr::width);
    for row in &rows {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.width());
        }
    }

    let mut out = String::new();
    push_row(&mut out, &TABLE_HEADER, &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    push_row(&mut out, &rule, &widths);
    for row in &rows {
        push_row(&mut out, row, &widths);
    }
    out
}

fn push_row(out: &mut String, cells: &[impl AsRef<str>], widths: &[usize]) {
    let mut line = String::new();
    for (i, (cell, width)) in cells.iter().zip(widths).enumerate() {
        let cell = cell.as_ref();
        if i > 0 {
            line.push_str("  ");
        }
        line.push_str(cell);
        line.push_str(&" ".repeat(width.saturating_sub(cell.width())));
    }
    out.push_str(line.trim_end());
    out.push('\n');
}

/// Selector entry: `nome - R$ valor`.
pub fn option_label(b: &Beneficio) -> String {
    format!("{} - {}", b.nome, b.valor.brl())
}

pub fn option_list(beneficios: &[Beneficio]) -> String {
    if beneficios.is_empty() {
        return format!("{EMPTY_LIST}\n");
    }
    let mut out = String::new();
    for b in beneficios {
        let id = b.id.map(|id| id.to_string()).unwrap_or_else(|| "-".into());
        let _ = writeln!(out, "[{id}] {}", option_label(b));
    }
    out
}

pub fn transfer_panel(preview: &TransferPreview) -> String {
    let mut out = String::new();
    if preview.same_target {
        let _ = writeln!(out, "{SAME_TARGET_WARNING}");
    }
    if let Some(origem) = &preview.origem {
        let _ = writeln!(out, "Benefício origem: {}", origem.nome);
        let _ = writeln!(out, "  Saldo atual: {}", origem.saldo_atual.brl());
        if let Some(apos) = origem.saldo_apos {
            let flag = if origem.insuficiente {
                " (Saldo insuficiente!)"
            } else {
                ""
            };
            let _ = writeln!(out, "  Saldo após transferência: {}{flag}", apos.brl());
        }
    }
    if let Some(destino) = &preview.destino {
        let _ = writeln!(out, "Benefício destino: {}", destino.nome);
        let _ = writeln!(out, "  Saldo atual: {}", destino.saldo_atual.brl());
        if let Some(apos) = destino.saldo_apos {
            let _ = writeln!(out, "  Saldo após transferência: {}", apos.brl());
        }
    }
    out
}

pub fn validation_errors(errors: &ValidationErrors) -> String {
    let mut out = String::new();
    for message in errors.messages() {
        let _ = writeln!(out, "- {message}");
    }
    out
}

pub fn form_summary(title: &str, draft: &BeneficioDraft, show_ativo: bool) -> String {
    let or_dash = |s: &str| {
        if s.trim().is_empty() {
            "-".to_string()
        } else {
            s.to_string()
        }
    };
    let mut out = String::new();
    let _ = writeln!(out, "{title}");
    let _ = writeln!(out, "  Nome: {}", or_dash(&draft.nome));
    let _ = writeln!(out, "  Descrição: {}", or_dash(&draft.descricao));
    let _ = writeln!(
        out,
        "  Valor: {}",
        draft.valor.map(Valor::brl).unwrap_or_else(|| "-".into())
    );
    if show_ativo {
        let _ = writeln!(out, "  Status: {}", status_label(draft.ativo));
    }
    out.push_str(&validation_errors(&draft.errors()));
    out
}
