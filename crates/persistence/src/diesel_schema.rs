// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

diesel::table! {
    terms (term_id) {
        term_id -> BigInt,
        name -> Text,
        slug -> Text,
        start_date -> Text,
        end_date -> Text,
        created_by -> BigInt,
    }
}

diesel::table! {
    class_offerings (offering_id) {
        offering_id -> BigInt,
        term_id -> BigInt,
        title -> Text,
        weekday -> Integer,
        start_time -> Text,
        end_time -> Text,
        duration_minutes -> BigInt,
        capacity -> BigInt,
        instructor_count -> BigInt,
        notes -> Nullable<Text>,
    }
}

diesel::table! {
    class_sessions (session_id) {
        session_id -> BigInt,
        offering_id -> BigInt,
        session_date -> Text,
        status -> Text,
        notes -> Nullable<Text>,
    }
}

diesel::table! {
    students (student_id) {
        student_id -> BigInt,
        first_name -> Text,
        last_name -> Text,
    }
}

diesel::table! {
    enrollments (enrollment_id) {
        enrollment_id -> BigInt,
        student_id -> BigInt,
        offering_id -> BigInt,
        status -> Text,
        enroll_date -> Text,
        end_date -> Nullable<Text>,
        class_ratio -> Text,
        transferred_from_id -> Nullable<BigInt>,
        transferred_to_id -> Nullable<BigInt>,
        transferred_at -> Nullable<Text>,
        notes -> Nullable<Text>,
    }
}

diesel::table! {
    enrollment_skips (skip_id) {
        skip_id -> BigInt,
        enrollment_id -> BigInt,
        class_session_id -> BigInt,
    }
}

diesel::table! {
    attendance_records (attendance_id) {
        attendance_id -> BigInt,
        enrollment_id -> BigInt,
        class_session_id -> BigInt,
        status -> Text,
        notes -> Nullable<Text>,
    }
}

diesel::table! {
    makeup_bookings (makeup_id) {
        makeup_id -> BigInt,
        student_id -> BigInt,
        class_session_id -> BigInt,
        status -> Text,
        notes -> Nullable<Text>,
    }
}

diesel::table! {
    trial_bookings (trial_id) {
        trial_id -> BigInt,
        class_session_id -> BigInt,
        child_name -> Text,
        child_age -> Nullable<BigInt>,
        contact_phone -> Nullable<Text>,
        status -> Text,
        converted_student_id -> Nullable<BigInt>,
    }
}

diesel::table! {
    invoice_line_items (line_item_id) {
        line_item_id -> BigInt,
        enrollment_id -> BigInt,
        description -> Text,
        amount_cents -> BigInt,
    }
}

diesel::joinable!(class_offerings -> terms (term_id));
diesel::joinable!(class_sessions -> class_offerings (offering_id));
diesel::joinable!(enrollments -> students (student_id));
diesel::joinable!(enrollments -> class_offerings (offering_id));
diesel::joinable!(enrollment_skips -> enrollments (enrollment_id));
diesel::joinable!(enrollment_skips -> class_sessions (class_session_id));
diesel::joinable!(attendance_records -> enrollments (enrollment_id));
diesel::joinable!(attendance_records -> class_sessions (class_session_id));
diesel::joinable!(makeup_bookings -> students (student_id));
diesel::joinable!(makeup_bookings -> class_sessions (class_session_id));
diesel::joinable!(trial_bookings -> class_sessions (class_session_id));
diesel::joinable!(invoice_line_items -> enrollments (enrollment_id));

diesel::allow_tables_to_appear_in_same_query!(
    terms,
    class_offerings,
    class_sessions,
    students,
    enrollments,
    enrollment_skips,
    attendance_records,
    makeup_bookings,
    trial_bookings,
    invoice_line_items,
);
