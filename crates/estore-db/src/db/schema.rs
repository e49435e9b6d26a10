diesel::table! {
    /// Customers of the repair shop. A customer may own many jobs.
    customer (id) {
        id -> Int4,
        name -> Text,
        phone -> Text,
        phone_secondary -> Nullable<Text>,
        email -> Nullable<Text>,
        address -> Nullable<Text>,
    }
}

diesel::table! {
    /// Device models the shop services (e.g. a phone or laptop model).
    device (id) {
        id -> Int4,
        name -> Text,
        device_type -> Text,
    }
}

diesel::table! {
    /// Repair jobs: a customer brings one device in with one or more problems.
    job (id) {
        id -> Int4,
        customer_id -> Int4,
        device_id -> Int4,
        receive_time -> Timestamptz,
        pickup_time -> Nullable<Timestamptz>,
        estimated_pickup_time -> Nullable<Timestamptz>,
        note -> Nullable<Text>,
        estimated_price -> Nullable<Numeric>,
        collected_price -> Nullable<Numeric>,
        is_finished -> Bool,
    }
}

diesel::table! {
    /// Known problems, each priced and scoped to a single device.
    /// `job_id` is set while the problem row is attached to a job.
    problem (id) {
        id -> Int4,
        name -> Text,
        price -> Numeric,
        device_id -> Int4,
        job_id -> Nullable<Int4>,
    }
}

diesel::joinable!(job -> customer (customer_id));
diesel::joinable!(job -> device (device_id));
diesel::joinable!(problem -> device (device_id));
diesel::joinable!(problem -> job (job_id));

diesel::allow_tables_to_appear_in_same_query!(customer, device, job, problem,);
