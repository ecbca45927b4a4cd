use tedge_owntracks_filter::BuiltinFilters;
use tedge_owntracks_filter::FilterBinding;
use tedge_owntracks_filter::FilterDispatcher;

pub struct ListCommand {
    pub topic: Option<String>,
}

impl ListCommand {
    pub fn execute(&self, builtins: &BuiltinFilters, dispatcher: &FilterDispatcher) {
        match &self.topic {
            Some(topic) => {
                for name in dispatcher.filters_for(topic) {
                    println!("{name}");
                }
            }
            None => {
                println!("builtin filters:");
                for name in builtins.names() {
                    println!("\t{name}");
                }
                println!("bindings:");
                dispatcher.bindings().iter().for_each(Self::display);
            }
        }
    }

    fn display(binding: &FilterBinding) {
        println!("\t{}", binding.filter.name());
        for topic in binding.topics.patterns() {
            println!("\t\t{topic}");
        }
    }
}
