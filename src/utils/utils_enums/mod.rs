use strum::IntoEnumIterator;

pub struct EnumUtils;
impl EnumUtils {
    pub fn get_all_variants_of_enum<T: IntoEnumIterator>() -> Vec<T> {
        let out: Vec<T> = T::iter().collect();
        out
    }
    /// The `Display` names of every variant, in declaration order.
    pub fn get_all_variant_names_of_enum<T: IntoEnumIterator + ToString>() -> Vec<String> {
        Self::get_all_variants_of_enum::<T>().iter().map(|v| v.to_string()).collect()
    }
}
