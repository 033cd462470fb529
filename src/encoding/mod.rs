pub mod category_encoder;
pub mod encoded_dataset;
