table! {
    bookings (id) {
        id -> Int8,
        start_date -> Timestamp,
        end_date -> Timestamp,
        item_id -> Int8,
        booker_id -> Int8,
        status -> Varchar,
    }
}

table! {
    comments (id) {
        id -> Int8,
        text -> Varchar,
        item_id -> Int8,
        author_id -> Int8,
        created -> Timestamp,
    }
}

table! {
    item_requests (id) {
        id -> Int8,
        description -> Varchar,
        requestor_id -> Int8,
        created -> Timestamp,
    }
}

table! {
    items (id) {
        id -> Int8,
        name -> Varchar,
        description -> Varchar,
        available -> Bool,
        owner_id -> Int8,
        request_id -> Nullable<Int8>,
    }
}

table! {
    users (id) {
        id -> Int8,
        name -> Varchar,
        email -> Varchar,
    }
}

joinable!(bookings -> items (item_id));
joinable!(bookings -> users (booker_id));
joinable!(comments -> items (item_id));
joinable!(comments -> users (author_id));
joinable!(item_requests -> users (requestor_id));
joinable!(items -> item_requests (request_id));
joinable!(items -> users (owner_id));

allow_tables_to_appear_in_same_query!(
    bookings,
    comments,
    item_requests,
    items,
    users,
);
