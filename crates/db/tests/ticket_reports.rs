use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use sqlx::PgPool;
use voskhod_core::report::{aggregate, ReportPeriod, ReportSort, TicketLine};
use voskhod_core::roles::ROLE_OPERATOR;
use voskhod_db::models::operator::CreateOperator;
use voskhod_db::models::report::ReportFilter;
use voskhod_db::models::schedule::CreateSchedule;
use voskhod_db::models::ship::CreateShip;
use voskhod_db::models::ticket::CreateTicket;
use voskhod_db::repositories::{
    OperatorRepo, ReportRepo, ScheduleRepo, ShiftRepo, ShipRepo, TicketRepo,
};

struct Fixture {
    operator_id: i64,
    shift_id: i64,
    schedule_id: i64,
}

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 7, d).unwrap()
}

async fn fixture(pool: &PgPool) -> Fixture {
    let operator_id = OperatorRepo::create(
        pool,
        &CreateOperator {
            username: "kassa1".into(),
            full_name: None,
            inn: None,
            role: ROLE_OPERATOR.into(),
            password_hash: "x".into(),
        },
    )
    .await
    .unwrap()
    .id;
    let ship = ShipRepo::create(
        pool,
        &CreateShip {
            name: "Zarya".into(),
            seat_limit: None,
        },
    )
    .await
    .unwrap();
    assert_eq!(ship.seat_limit, 20);
    let schedule = ScheduleRepo::create(
        pool,
        &CreateSchedule {
            ship_id: ship.id,
            berth_id: None,
            start_time: NaiveTime::from_hms_opt(11, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(12, 0, 0).unwrap(),
        },
    )
    .await
    .unwrap();
    let shift_id = ShiftRepo::create(pool, operator_id, day(10)).await.unwrap();
    ReportRepo::ensure_for_shift(pool, shift_id, day(10)).await.unwrap();
    Fixture {
        operator_id,
        shift_id,
        schedule_id: schedule.id,
    }
}

async fn sell(pool: &PgPool, f: &Fixture, adult: i32, child: i32, cents: i64) -> i64 {
    TicketRepo::insert(
        pool,
        &CreateTicket {
            shift_id: f.shift_id,
            schedule_id: f.schedule_id,
            landing_place_id: None,
            ticket_day: day(10),
            adult_quantity: adult,
            child_quantity: child,
            total_amount: Decimal::new(cents, 2),
            bought: true,
        },
    )
    .await
    .unwrap()
}

async fn recompute(pool: &PgPool, f: &Fixture) {
    let lines: Vec<TicketLine> = TicketRepo::lines_for_shift(pool, f.shift_id)
        .await
        .unwrap()
        .into_iter()
        .map(Into::into)
        .collect();
    ReportRepo::upsert_totals(pool, f.shift_id, day(10), &aggregate(&lines))
        .await
        .unwrap();
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn sold_passengers_ignore_returned_tickets(pool: PgPool) {
    let f = fixture(&pool).await;
    sell(&pool, &f, 2, 1, 1000).await;
    let returned = sell(&pool, &f, 4, 0, 2000).await;
    TicketRepo::mark_returned(&pool, returned).await.unwrap();

    let sold = TicketRepo::sold_passengers(&pool, f.schedule_id, day(10))
        .await
        .unwrap();
    assert_eq!(sold, 3);
    let other_day = TicketRepo::sold_passengers(&pool, f.schedule_id, day(11))
        .await
        .unwrap();
    assert_eq!(other_day, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn report_is_recomputed_from_scratch(pool: PgPool) {
    let f = fixture(&pool).await;
    sell(&pool, &f, 2, 1, 150000).await;
    let second = sell(&pool, &f, 1, 0, 50000).await;
    recompute(&pool, &f).await;

    let reports = ReportRepo::list(
        &pool,
        &ReportFilter {
            period: ReportPeriod::All,
            shift_id: Some(f.shift_id),
            operator_id: None,
            sort: ReportSort::Newest,
        },
    )
    .await
    .unwrap();
    assert_eq!(reports.len(), 1);
    let report = &reports[0];
    assert_eq!(report.total_adult_quantity, 3);
    assert_eq!(report.total_amount, Decimal::new(200000, 2));

    TicketRepo::mark_returned(&pool, second).await.unwrap();
    recompute(&pool, &f).await;

    let report = ReportRepo::find_by_id(&pool, report.id).await.unwrap().unwrap();
    assert_eq!(report.total_adult_quantity, 2);
    assert_eq!(report.total_child_quantity, 1);
    assert_eq!(report.total_amount, Decimal::new(150000, 2));
    assert_eq!(report.operator_id, f.operator_id);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn report_listing_filters_by_period(pool: PgPool) {
    let f = fixture(&pool).await;
    sell(&pool, &f, 1, 0, 1000).await;
    recompute(&pool, &f).await;

    let listing = |period| ReportFilter {
        period,
        shift_id: None,
        operator_id: None,
        sort: ReportSort::Newest,
    };

    let july = ReportRepo::list(&pool, &listing(ReportPeriod::Month { year: 2026, month: 7 }))
        .await
        .unwrap();
    assert_eq!(july.len(), 1);

    let june = ReportRepo::list(&pool, &listing(ReportPeriod::MonthOfAnyYear(6)))
        .await
        .unwrap();
    assert!(june.is_empty());

    let that_day = ReportRepo::list(&pool, &listing(ReportPeriod::Day(day(10))))
        .await
        .unwrap();
    assert_eq!(that_day.len(), 1);

    let totals = ReportRepo::monthly_totals(&pool, 2026, 7).await.unwrap();
    assert_eq!(totals.len(), 1);
    assert_eq!(totals[0].total_amount, Decimal::new(1000, 2));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn ticket_row_carries_schedule_details(pool: PgPool) {
    let f = fixture(&pool).await;
    let id = sell(&pool, &f, 1, 1, 1000).await;
    TicketRepo::set_qr_payload(&pool, id, "{}").await.unwrap();

    let ticket = TicketRepo::find_by_id(&pool, id).await.unwrap().unwrap();
    assert_eq!(ticket.ship_name, "Zarya");
    assert_eq!(ticket.operator_username, "kassa1");
    assert_eq!(ticket.berth_name, None);
    assert!(ticket.price_type_ids.is_empty());
    assert_eq!(ticket.qr_payload.as_deref(), Some("{}"));
    assert!(TicketRepo::exists_for_operator(&pool, f.operator_id).await.unwrap());
}
