//! Client-side balance preview for the transfer screen.
//!
//! The preview is informational only: the backend owns the actual balance
//! update and the sufficient-funds check.

use crate::models::{Beneficio, BeneficioId};
use crate::money::Valor;
use crate::validation::TransferDraft;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BalancePreview {
    pub id: BeneficioId,
    pub nome: String,
    pub saldo_atual: Valor,
    /// Present only when the requested amount is greater than zero.
    pub saldo_apos: Option<Valor>,
    pub insuficiente: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransferPreview {
    pub origem: Option<BalancePreview>,
    pub destino: Option<BalancePreview>,
    pub same_target: bool,
}

impl TransferPreview {
    pub fn compute(beneficios: &[Beneficio], draft: &TransferDraft) -> Self {
        let amount = draft.valor.filter(|v| v.is_positive());
        let find = |id: Option<BeneficioId>| {
            id.and_then(|id| beneficios.iter().find(|b| b.id == Some(id)).map(|b| (id, b)))
        };

        let origem = find(draft.from_id).map(|(id, b)| BalancePreview {
            id,
            nome: b.nome.clone(),
            saldo_atual: b.valor,
            saldo_apos: amount.map(|v| b.valor - v),
            insuficiente: amount.is_some_and(|v| v > b.valor),
        });
        let destino = find(draft.to_id).map(|(id, b)| BalancePreview {
            id,
            nome: b.nome.clone(),
            saldo_atual: b.valor,
            saldo_apos: amount.map(|v| b.valor + v),
            insuficiente: false,
        });

        Self {
            origem,
            destino,
            same_target: draft.same_target(),
        }
    }
}

/// Whether the transfer form may be submitted right now.
pub fn can_submit(draft: &TransferDraft, in_flight: bool) -> bool {
    !in_flight && !draft.same_target() && draft.is_valid()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn beneficio(id: BeneficioId, nome: &str, cents: i64) -> Beneficio {
        Beneficio {
            id: Some(id),
            ..Beneficio::new(nome, None, Valor::from_cents(cents))
        }
    }

    fn list() -> Vec<Beneficio> {
        vec![
            beneficio(1, "Alimentação", 100_000),
            beneficio(2, "Saúde", 50_000),
        ]
    }

    #[test]
    fn balances_move_by_requested_amount() {
        let draft = TransferDraft {
            from_id: Some(1),
            to_id: Some(2),
            valor: Some(Valor::from_cents(25_000)),
        };
        let p = TransferPreview::compute(&list(), &draft);
        let origem = p.origem.unwrap();
        let destino = p.destino.unwrap();
        assert_eq!(origem.saldo_apos, Some(Valor::from_cents(75_000)));
        assert_eq!(destino.saldo_apos, Some(Valor::from_cents(75_000)));
        assert!(!origem.insuficiente);
        assert!(!p.same_target);
    }

    #[test]
    fn overdraft_is_flagged_but_still_previewed() {
        let draft = TransferDraft {
            from_id: Some(2),
            to_id: Some(1),
            valor: Some(Valor::from_cents(60_000)),
        };
        let p = TransferPreview::compute(&list(), &draft);
        let origem = p.origem.unwrap();
        assert!(origem.insuficiente);
        assert_eq!(origem.saldo_apos, Some(Valor::from_cents(-10_000)));
    }

    #[test]
    fn no_after_balance_without_positive_amount() {
        let draft = TransferDraft {
            from_id: Some(1),
            to_id: None,
            valor: Some(Valor::ZERO),
        };
        let p = TransferPreview::compute(&list(), &draft);
        assert_eq!(p.origem.unwrap().saldo_apos, None);
        assert!(p.destino.is_none());
    }

    #[test]
    fn unknown_ids_have_no_panel() {
        let draft = TransferDraft {
            from_id: Some(9),
            to_id: Some(9),
            valor: Some(Valor::from_cents(1)),
        };
        let p = TransferPreview::compute(&list(), &draft);
        assert!(p.origem.is_none());
        assert!(p.same_target);
    }

    #[test]
    fn submit_gate() {
        let mut draft = TransferDraft {
            from_id: Some(1),
            to_id: Some(2),
            valor: Some(Valor::from_cents(100)),
        };
        assert!(can_submit(&draft, false));
        assert!(!can_submit(&draft, true));
        draft.to_id = Some(1);
        assert!(!can_submit(&draft, false));
        draft.to_id = Some(2);
        draft.valor = None;
        assert!(!can_submit(&draft, false));
    }
}
