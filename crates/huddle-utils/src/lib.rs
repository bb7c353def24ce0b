// huddle/huddle-utils
//
// Copyright: 2026, Huddle Contributors
// License: Mozilla Public License v2.0 (MPL v2.0)

mod id_string_macro;
