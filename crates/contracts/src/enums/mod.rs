pub mod form_type;
