//! Primitive validation shared by node constructors and hydration

pub mod validator;
