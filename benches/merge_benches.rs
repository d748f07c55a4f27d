use criterion::{black_box, criterion_group, criterion_main, Criterion};
use ledger_merge::bank::merge_bank_account;
use ledger_merge::credit_card::merge_credit_card;
use ledger_merge::fragment::Fragment;

/// Builds `count` monthly fragments of `rows` transactions each, with a few
/// blank dates and balance lines sprinkled in.
fn bank_fragments(count: usize, rows: usize) -> Vec<Fragment> {
    (0..count)
        .map(|month| {
            let mut csv = String::from("Date,Description,Withdrawals,Deposit,Balance\n");
            csv.push_str(&format!(
                "2023/{:02}/01,Opening Balance,,,1000.00\n",
                month % 12 + 1
            ));
            for row in 0..rows {
                let date = match row % 7 {
                    0 => String::new(),
                    _ => format!("2023/{:02}/{:02}", month % 12 + 1, row % 28 + 1),
                };
                csv.push_str(&format!(
                    "{},\"PURCHASE\n#{}\",{}.25,,{}.00\n",
                    date, row, row % 90, 1000 - row % 90
                ));
            }
            Fragment::from_reader(format!("{}.csv", month).into(), csv.as_bytes()).unwrap()
        })
        .collect()
}

fn card_fragments(count: usize, rows: usize) -> Vec<Fragment> {
    (0..count)
        .map(|month| {
            let mut csv = String::from("Transaction Date,Posting Date,Description,Amount\n");
            for row in 0..rows {
                let day = row % 28 + 1;
                let transaction_date = match row % 5 {
                    0 => format!("\"March {}, 2023\"", day),
                    _ => format!("2023/{:02}/{:02}", month % 12 + 1, day),
                };
                csv.push_str(&format!(
                    "{},2023/{:02}/{:02},MERCHANT {},{}.99\n",
                    transaction_date,
                    month % 12 + 1,
                    day,
                    row,
                    row
                ));
            }
            Fragment::from_reader(format!("{}.csv", month).into(), csv.as_bytes()).unwrap()
        })
        .collect()
}

fn criterion_benchmark(c: &mut Criterion) {
    let bank_small = bank_fragments(12, 40);
    let bank_large = bank_fragments(60, 400);
    let card_small = card_fragments(12, 40);
    let card_large = card_fragments(60, 400);

    c.bench_function("bank_account_year", |b| {
        b.iter(|| merge_bank_account(black_box(&bank_small)))
    });

    c.bench_function("bank_account_five_years", |b| {
        b.iter(|| merge_bank_account(black_box(&bank_large)))
    });

    c.bench_function("credit_card_year", |b| {
        b.iter(|| merge_credit_card(black_box(&card_small)))
    });

    c.bench_function("credit_card_five_years", |b| {
        b.iter(|| merge_credit_card(black_box(&card_large)))
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
