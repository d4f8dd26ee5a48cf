//! Conversions between ledger domain types and the wire DTOs.

use api_types::{
    category::CategoryView,
    loan::{LoanKind, LoanView},
    stats::{CategoryStatView, MonthlySummaryView, PeriodView},
    transaction::TransactionView,
    wallet::WalletView,
};

pub(crate) fn currency_to_wire(value: ledger::Currency) -> api_types::Currency {
    match value {
        ledger::Currency::Eur => api_types::Currency::Eur,
        ledger::Currency::Usd => api_types::Currency::Usd,
        ledger::Currency::Gbp => api_types::Currency::Gbp,
    }
}

pub(crate) fn currency_from_wire(value: api_types::Currency) -> ledger::Currency {
    match value {
        api_types::Currency::Eur => ledger::Currency::Eur,
        api_types::Currency::Usd => ledger::Currency::Usd,
        api_types::Currency::Gbp => ledger::Currency::Gbp,
    }
}

pub(crate) fn kind_to_wire(value: ledger::TransactionKind) -> api_types::TransactionKind {
    match value {
        ledger::TransactionKind::Income => api_types::TransactionKind::Income,
        ledger::TransactionKind::Expense => api_types::TransactionKind::Expense,
        ledger::TransactionKind::LoanGiven => api_types::TransactionKind::LoanGiven,
        ledger::TransactionKind::LoanReceived => api_types::TransactionKind::LoanReceived,
    }
}

pub(crate) fn kind_from_wire(value: api_types::TransactionKind) -> ledger::TransactionKind {
    match value {
        api_types::TransactionKind::Income => ledger::TransactionKind::Income,
        api_types::TransactionKind::Expense => ledger::TransactionKind::Expense,
        api_types::TransactionKind::LoanGiven => ledger::TransactionKind::LoanGiven,
        api_types::TransactionKind::LoanReceived => ledger::TransactionKind::LoanReceived,
    }
}

pub(crate) fn loan_kind_to_wire(value: ledger::LoanKind) -> LoanKind {
    match value {
        ledger::LoanKind::Given => LoanKind::Given,
        ledger::LoanKind::Received => LoanKind::Received,
    }
}

pub(crate) fn loan_kind_from_wire(value: LoanKind) -> ledger::LoanKind {
    match value {
        LoanKind::Given => ledger::LoanKind::Given,
        LoanKind::Received => ledger::LoanKind::Received,
    }
}

pub(crate) fn wallet_view(wallet: ledger::Wallet) -> WalletView {
    WalletView {
        id: wallet.id,
        name: wallet.name,
        balance_minor: wallet.balance_minor,
        currency: currency_to_wire(wallet.currency),
        is_default: wallet.is_default,
    }
}

pub(crate) fn transaction_view(tx: ledger::Transaction) -> TransactionView {
    TransactionView {
        id: tx.id,
        wallet_id: tx.wallet_id,
        category_id: tx.category_id,
        kind: kind_to_wire(tx.kind),
        amount_minor: tx.amount_minor,
        currency: currency_to_wire(tx.currency),
        occurred_at: tx.occurred_at,
        note: tx.note,
    }
}

pub(crate) fn category_view(category: ledger::FinanceCategory) -> CategoryView {
    CategoryView {
        id: category.id,
        name: category.name,
        kind: kind_to_wire(category.kind),
        color: category.color,
    }
}

pub(crate) fn loan_view(loan: ledger::Loan) -> LoanView {
    LoanView {
        id: loan.id,
        counterparty: loan.counterparty,
        amount_minor: loan.amount_minor,
        currency: currency_to_wire(loan.currency),
        kind: loan_kind_to_wire(loan.kind),
        is_paid: loan.is_paid,
        date: loan.date,
    }
}

pub(crate) fn monthly_summary_view(summary: ledger::MonthlySummary) -> MonthlySummaryView {
    MonthlySummaryView {
        income_minor: summary.income_minor,
        expense_minor: summary.expense_minor,
        balance_minor: summary.balance_minor,
        transaction_count: summary.transaction_count,
        period: PeriodView {
            year: summary.period.year,
            month: summary.period.month,
            start: summary.period.start,
            end: summary.period.end,
        },
    }
}

pub(crate) fn category_stat_view(stat: ledger::CategoryStat) -> CategoryStatView {
    CategoryStatView {
        category_id: stat.category_id,
        name: stat.name,
        color: stat.color,
        amount_minor: stat.amount_minor,
        count: stat.count,
    }
}
